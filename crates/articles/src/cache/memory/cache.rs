//! In-memory cache implementation.
//!
//! Each partition is a map of fields with an optional expiry shared by all of
//! them, mirroring how the Redis backend applies `EXPIRE` to a whole hash.
//! Expired partitions are dropped lazily on access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use articles_core::cache::{Cache, Result};

/// A partition and its optional expiration.
#[derive(Debug, Clone, Default)]
struct Partition {
    fields: HashMap<String, Vec<u8>>,
    expires_at: Option<Instant>,
}

impl Partition {
    /// Returns true if this partition has expired.
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }

    /// Pushes the expiry forward after a write.
    fn touch(&mut self, ttl: Option<Duration>) {
        self.expires_at = ttl.map(|d| Instant::now() + d);
    }
}

/// In-memory cache implementation.
///
/// Thread-safe cache using `Arc<RwLock<HashMap>>` for concurrent access.
/// Cloning shares the underlying store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    store: Arc<RwLock<HashMap<String, Partition>>>,
}

impl MemoryCache {
    /// Creates a new empty in-memory cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a live partition for writing, replacing it if expired.
    fn live_partition<'a>(
        store: &'a mut HashMap<String, Partition>,
        partition: &str,
    ) -> &'a mut Partition {
        let slot = store.entry(partition.to_string()).or_default();
        if slot.is_expired() {
            *slot = Partition::default();
        }
        slot
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, partition: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let store = self.store.read().await;

        match store.get(partition) {
            Some(p) if p.is_expired() => Ok(None),
            Some(p) => Ok(p.fields.get(key).cloned()),
            None => Ok(None),
        }
    }

    async fn get_all(&self, partition: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let store = self.store.read().await;

        match store.get(partition) {
            Some(p) if !p.is_expired() => Ok(p
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    async fn set(
        &self,
        partition: &str,
        key: &str,
        value: &[u8],
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut store = self.store.write().await;
        let slot = Self::live_partition(&mut store, partition);
        slot.fields.insert(key.to_string(), value.to_vec());
        slot.touch(ttl);
        Ok(())
    }

    async fn replace_all(
        &self,
        partition: &str,
        entries: &[(String, Vec<u8>)],
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut store = self.store.write().await;

        if entries.is_empty() {
            store.remove(partition);
            return Ok(());
        }

        let mut slot = Partition {
            fields: entries.iter().cloned().collect(),
            expires_at: None,
        };
        slot.touch(ttl);
        store.insert(partition.to_string(), slot);
        Ok(())
    }

    async fn delete(&self, partition: &str, key: &str) -> Result<()> {
        let mut store = self.store.write().await;

        if let Some(slot) = store.get_mut(partition) {
            slot.fields.remove(key);
            // Clean up empty partitions
            if slot.fields.is_empty() {
                store.remove(partition);
            }
        }

        Ok(())
    }
}
