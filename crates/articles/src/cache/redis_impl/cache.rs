//! Redis cache implementation.
//!
//! Partitions are Redis hashes. TTLs are applied with `EXPIRE` on the whole
//! hash after each write, so a collection and its completeness marker always
//! expire together.
//!
//! A single-field write and its `EXPIRE` are two commands. If the process dies
//! in between, the hash simply keeps its previous expiry. Replacing a whole
//! partition runs `DEL`, `HSET` and `EXPIRE` in one transaction.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use articles_core::cache::{Cache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }

    async fn expire(
        conn: &mut redis::aio::ConnectionManager,
        partition: &str,
        ttl: Option<Duration>,
    ) -> Result<()> {
        if let Some(duration) = ttl {
            let seconds = duration.as_secs().max(1) as i64;
            conn.expire::<_, ()>(partition, seconds)
                .await
                .map_err(map_redis_error)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, partition: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.hget(partition, key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn get_all(&self, partition: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, Vec<u8>> =
            conn.hgetall(partition).await.map_err(map_redis_error)?;
        Ok(fields.into_iter().collect())
    }

    async fn set(
        &self,
        partition: &str,
        key: &str,
        value: &[u8],
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut conn = self.conn.clone();

        conn.hset::<_, _, _, ()>(partition, key, value)
            .await
            .map_err(map_redis_error)?;

        Self::expire(&mut conn, partition, ttl).await
    }

    async fn replace_all(
        &self,
        partition: &str,
        entries: &[(String, Vec<u8>)],
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut conn = self.conn.clone();

        // MULTI/EXEC so readers never see the hash half rewritten
        let mut pipe = redis::pipe();
        pipe.atomic().del(partition).ignore();
        if !entries.is_empty() {
            pipe.hset_multiple(partition, entries).ignore();
            if let Some(duration) = ttl {
                pipe.expire(partition, duration.as_secs().max(1) as i64).ignore();
            }
        }

        let _: () = pipe.query_async(&mut conn).await.map_err(map_redis_error)?;
        Ok(())
    }

    async fn delete(&self, partition: &str, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.hdel::<_, _, ()>(partition, key)
            .await
            .map_err(map_redis_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Connects to Redis, or returns None so the test can be skipped.
    async fn connect() -> Option<RedisCache> {
        match RedisCache::new(&redis_url()).await {
            Ok(cache) => Some(cache),
            Err(err) => {
                eprintln!("Skipping Redis test: {err}");
                None
            }
        }
    }

    fn unique_partition(name: &str) -> String {
        format!("test:{}:{}", name, uuid::Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_hash_roundtrip() {
        let Some(cache) = connect().await else {
            return;
        };
        let partition = unique_partition("roundtrip");

        cache.set(&partition, "ARTICLE#1", b"one", None).await.unwrap();
        assert_eq!(
            cache.get(&partition, "ARTICLE#1").await.unwrap(),
            Some(b"one".to_vec())
        );

        cache.delete(&partition, "ARTICLE#1").await.unwrap();
        assert_eq!(cache.get(&partition, "ARTICLE#1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_replace_all_and_get_all() {
        let Some(cache) = connect().await else {
            return;
        };
        let partition = unique_partition("many");
        let entries = vec![
            ("ARTICLE#1".to_string(), b"one".to_vec()),
            ("#loaded".to_string(), b"1".to_vec()),
        ];

        cache
            .replace_all(&partition, &entries, Some(Duration::from_secs(30)))
            .await
            .unwrap();

        let mut all = cache.get_all(&partition).await.unwrap();
        all.sort();
        assert_eq!(
            all,
            vec![
                ("#loaded".to_string(), b"1".to_vec()),
                ("ARTICLE#1".to_string(), b"one".to_vec()),
            ]
        );

        cache.delete(&partition, "ARTICLE#1").await.unwrap();
        cache.delete(&partition, "#loaded").await.unwrap();
    }

    #[tokio::test]
    async fn test_replace_all_drops_previous_fields() {
        let Some(cache) = connect().await else {
            return;
        };
        let partition = unique_partition("replace");
        cache.set(&partition, "ARTICLE#stale", b"gone", None).await.unwrap();
        let entries = vec![("ARTICLE#1".to_string(), b"one".to_vec())];

        cache
            .replace_all(&partition, &entries, Some(Duration::from_secs(30)))
            .await
            .unwrap();

        assert_eq!(cache.get_all(&partition).await.unwrap(), entries);
        assert_eq!(cache.get(&partition, "ARTICLE#stale").await.unwrap(), None);

        cache.delete(&partition, "ARTICLE#1").await.unwrap();
    }
}
