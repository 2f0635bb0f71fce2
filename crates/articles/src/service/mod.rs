//! Business logic over the article store.
//!
//! The service is the only place where the store and the cache meet:
//!
//! - **Reads**: served through [`crate::cache::CacheLayer`], falling back to the
//!   repository on a miss
//! - **Writes**: persisted to the repository first, then mirrored into (or
//!   evicted from) the cache in the background
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let repo = Arc::new(InMemoryRepository::new());
//! let cache = CacheLayer::new(Arc::new(MemoryCache::new()), None);
//!
//! let articles = ArticleService::new(repo, cache);
//! let article = articles.save(&principal, &ArticleData::new("Hi")).await?;
//! ```

mod article;

pub use article::ArticleService;
