use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for partitioned key-value cache operations.
///
/// Values are addressed by `(partition, key)`. A partition behaves like a
/// hash: its fields can be read one at a time or all at once, and an optional
/// TTL applies to the partition as a whole, refreshed on every write.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a single value from a partition.
    async fn get(&self, partition: &str, key: &str) -> Result<Option<Vec<u8>>>;

    /// Gets every `(key, value)` pair stored in a partition, in no particular order.
    async fn get_all(&self, partition: &str) -> Result<Vec<(String, Vec<u8>)>>;

    /// Sets a single value in a partition.
    async fn set(
        &self,
        partition: &str,
        key: &str,
        value: &[u8],
        ttl: Option<Duration>,
    ) -> Result<()>;

    /// Replaces the whole content of a partition with `entries`.
    ///
    /// Fields not in `entries` are gone afterwards, so the partition holds
    /// exactly what was written.
    async fn replace_all(
        &self,
        partition: &str,
        entries: &[(String, Vec<u8>)],
        ttl: Option<Duration>,
    ) -> Result<()>;

    /// Deletes a single value from a partition.
    async fn delete(&self, partition: &str, key: &str) -> Result<()>;
}
