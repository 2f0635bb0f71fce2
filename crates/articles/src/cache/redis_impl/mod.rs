//! Redis cache backend implementation.
//!
//! Provides a distributed cache using Redis hashes for multi-instance
//! deployments. One hash per partition, one field per sort key.

mod cache;
mod error;

pub use cache::RedisCache;
