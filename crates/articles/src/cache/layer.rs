//! Cache-aside policy over a [`Cache`] backend.
//!
//! - **Reads**: check the cache first, on miss call the loader and populate
//!   the cache with what it returned
//! - **Writes**: `put` and `forget` are spawned as detached tasks; the caller
//!   never waits for them and never sees their errors
//!
//! Every cache failure is logged and otherwise ignored. The loader's own error
//! is returned untouched and nothing is cached for it.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::task::TaskTracker;

use articles_core::cache::{deserialize_value, serialize_value, Cache, COLLECTION_MARKER};

/// Cache-aside front for a shared cache backend.
///
/// Built once per process and cloned into whatever needs it; clones share the
/// backend and the set of in-flight detached writes.
#[derive(Clone)]
pub struct CacheLayer {
    cache: Arc<dyn Cache>,
    ttl: Option<Duration>,
    pending: TaskTracker,
}

impl CacheLayer {
    /// Creates a cache layer.
    ///
    /// # Arguments
    ///
    /// * `cache` - The cache backend
    /// * `ttl` - Optional time-to-live applied to partitions on every write
    pub fn new(cache: Arc<dyn Cache>, ttl: Option<Duration>) -> Self {
        Self {
            cache,
            ttl,
            pending: TaskTracker::new(),
        }
    }

    /// Returns the cached value for `(partition, key)`, or loads and caches it.
    pub async fn fetch_one<T, E, F, Fut>(
        &self,
        partition: &str,
        key: &str,
        loader: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.cache.get(partition, key).await {
            Ok(Some(bytes)) => match deserialize_value(&bytes) {
                Ok(value) => {
                    tracing::trace!(partition, key, "Cache hit");
                    return Ok(value);
                }
                // Deserialization failed - treat as cache miss
                Err(err) => {
                    tracing::warn!(partition, key, error = %err, "Cache value deserialization failed")
                }
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(partition, key, error = %err, "Cache read failed"),
        }

        tracing::trace!(partition, key, "Cache miss");
        let value = loader().await?;

        match serialize_value(&value) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(partition, key, &bytes, self.ttl).await {
                    tracing::warn!(partition, key, error = %err, "Failed to cache value");
                }
            }
            Err(err) => tracing::warn!(partition, key, error = %err, "Failed to serialize value"),
        }

        Ok(value)
    }

    /// Returns the cached collection stored in `partition`, or loads and caches it.
    ///
    /// The collection is one cache unit: it only counts as a hit when a previous
    /// load marked the partition complete, and a load replaces the partition
    /// wholesale so fields left over from earlier writes never join it. Items
    /// are returned ordered by `sort_key`, which is also the field each item is
    /// stored under.
    pub async fn fetch_many<T, E, K, F, Fut>(
        &self,
        partition: &str,
        sort_key: K,
        loader: F,
    ) -> Result<Vec<T>, E>
    where
        T: Serialize + DeserializeOwned,
        K: Fn(&T) -> String,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
    {
        if let Some(items) = self.cached_collection(partition).await {
            tracing::trace!(partition, count = items.len(), "Cache hit for collection");
            return Ok(items);
        }

        tracing::trace!(partition, "Cache miss for collection");
        let mut keyed: Vec<(String, T)> = loader()
            .await?
            .into_iter()
            .map(|item| (sort_key(&item), item))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let entries: Result<Vec<(String, Vec<u8>)>, _> = keyed
            .iter()
            .map(|(key, item)| serialize_value(item).map(|bytes| (key.clone(), bytes)))
            .collect();

        match entries {
            Ok(mut entries) => {
                entries.push((COLLECTION_MARKER.to_string(), b"1".to_vec()));
                if let Err(err) = self
                    .cache
                    .replace_all(partition, &entries, self.ttl)
                    .await
                {
                    tracing::warn!(partition, error = %err, "Failed to cache collection");
                }
            }
            // Caching a partial collection would turn into a wrong hit
            Err(err) => {
                tracing::warn!(partition, error = %err, "Failed to serialize collection")
            }
        }

        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }

    /// Overwrites `(partition, key)` in the background.
    pub fn put<T: Serialize + ?Sized>(&self, partition: &str, key: &str, value: &T) {
        let bytes = match serialize_value(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(partition, key, error = %err, "Failed to serialize value");
                return;
            }
        };

        let cache = Arc::clone(&self.cache);
        let ttl = self.ttl;
        let partition = partition.to_string();
        let key = key.to_string();
        self.pending.spawn(async move {
            if let Err(err) = cache.set(&partition, &key, &bytes, ttl).await {
                tracing::warn!(%partition, %key, error = %err, "Failed to cache value");
            }
        });
    }

    /// Removes `(partition, key)` in the background.
    pub fn forget(&self, partition: &str, key: &str) {
        let cache = Arc::clone(&self.cache);
        let partition = partition.to_string();
        let key = key.to_string();
        self.pending.spawn(async move {
            if let Err(err) = cache.delete(&partition, &key).await {
                tracing::warn!(%partition, %key, error = %err, "Failed to invalidate cache value");
            }
        });
    }

    /// Waits for every detached write issued so far to finish.
    pub async fn drain(&self) {
        self.pending.close();
        self.pending.wait().await;
        self.pending.reopen();
    }

    /// Returns the number of detached writes still running.
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Reads a complete collection, or None if the partition must be reloaded.
    async fn cached_collection<T: DeserializeOwned>(&self, partition: &str) -> Option<Vec<T>> {
        let mut fields = match self.cache.get_all(partition).await {
            Ok(fields) => fields,
            Err(err) => {
                tracing::warn!(partition, error = %err, "Cache read failed");
                return None;
            }
        };

        let marker = fields.iter().position(|(k, _)| k == COLLECTION_MARKER)?;
        fields.swap_remove(marker);
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut items = Vec::with_capacity(fields.len());
        for (key, bytes) in fields {
            match deserialize_value(&bytes) {
                Ok(item) => items.push(item),
                Err(err) => {
                    tracing::warn!(partition, %key, error = %err, "Cache collection deserialization failed");
                    return None;
                }
            }
        }
        Some(items)
    }
}
