//! In-memory cache backend implementation.
//!
//! Provides a thread-safe in-memory cache with partition TTL support
//! for single-instance deployments and tests.

mod cache;

pub use cache::MemoryCache;
