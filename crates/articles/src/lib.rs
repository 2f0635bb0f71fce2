//! Cache-aside article service.
//!
//! [`service::ArticleService`] composes an [`articles_core::storage::ArticleRepository`]
//! (the source of truth) with a [`cache::CacheLayer`]. Backends are selected at
//! compile time via feature flags; see [`cache`] and [`storage`].

pub mod cache;
pub mod config;
pub mod service;
pub mod state;
pub mod storage;
