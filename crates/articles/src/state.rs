//! Application state.
//!
//! Wires the storage and cache backends selected by feature flags into one
//! [`ArticleService`]. The cache layer is built here once per process and
//! shared by every clone of the state.

use std::sync::Arc;

use articles_core::cache::Cache;
use articles_core::storage::ArticleRepository;

use crate::cache::CacheLayer;
use crate::config::Config;
use crate::service::ArticleService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Article operations (cache-aside over the configured store).
    pub articles: ArticleService,
}

impl AppState {
    /// Creates AppState with the backends enabled at compile time.
    pub async fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        let repository = repository(config).await?;
        let cache = CacheLayer::new(cache(config).await?, config.cache_ttl());

        tracing::debug!(ttl = ?config.cache_ttl(), "Application state initialized");
        Ok(Self::build(repository, cache))
    }

    /// Creates AppState from already constructed parts.
    pub fn build(repository: Arc<dyn ArticleRepository>, cache: CacheLayer) -> Self {
        Self {
            articles: ArticleService::new(repository, cache),
        }
    }

    /// Waits for every background cache write to finish.
    pub async fn shutdown(&self) {
        let cache = self.articles.cache();
        let pending = cache.pending_writes();
        if pending > 0 {
            tracing::debug!(pending, "Waiting for pending cache writes");
        }
        cache.drain().await;
    }
}

// ============================================================================
// Factory functions for the selected backends
// ============================================================================

#[cfg(feature = "inmemory")]
async fn repository(_config: &Config) -> Result<Arc<dyn ArticleRepository>, anyhow::Error> {
    use crate::storage::InMemoryRepository;

    tracing::info!("Using in-memory storage");
    Ok(Arc::new(InMemoryRepository::new()))
}

#[cfg(feature = "dynamodb")]
async fn repository(config: &Config) -> Result<Arc<dyn ArticleRepository>, anyhow::Error> {
    use crate::storage::DynamoDbRepository;

    let repository = DynamoDbRepository::from_env(&config.dynamodb_table_name).await;
    tracing::info!(table = repository.table_name(), "Using DynamoDB storage");
    Ok(Arc::new(repository))
}

#[cfg(feature = "memory")]
async fn cache(_config: &Config) -> Result<Arc<dyn Cache>, anyhow::Error> {
    use crate::cache::MemoryCache;

    tracing::info!("Using in-memory cache");
    Ok(Arc::new(MemoryCache::new()))
}

#[cfg(feature = "redis")]
async fn cache(config: &Config) -> Result<Arc<dyn Cache>, anyhow::Error> {
    use crate::cache::RedisCache;

    tracing::info!(url = %config.redis_url, "Using Redis cache");
    Ok(Arc::new(RedisCache::new(&config.redis_url).await?))
}

#[cfg(all(test, feature = "inmemory", feature = "memory"))]
mod tests {
    use super::*;
    use articles_core::article::{ArticleData, Principal};

    fn config() -> Config {
        Config {
            cache_ttl_seconds: 0,
            redis_url: "redis://localhost:6379".to_string(),
            dynamodb_table_name: "articles".to_string(),
        }
    }

    #[tokio::test]
    async fn test_clones_share_store_and_cache() {
        let state = AppState::from_config(&config()).await.unwrap();
        let other = state.clone();

        let saved = state
            .articles
            .save(&Principal::new("u1"), &ArticleData::new("Hi"))
            .await
            .unwrap();
        other.shutdown().await;

        assert_eq!(state.articles.cache().pending_writes(), 0);
        assert_eq!(other.articles.find_by_id(saved.id).await.unwrap(), saved);
        assert_eq!(other.articles.find_all().await.unwrap(), vec![saved]);
    }
}
