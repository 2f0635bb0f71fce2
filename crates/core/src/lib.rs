//! Core contracts for the articles service.
//!
//! Pure types and traits only: the article domain model, the cache and
//! repository seams, key builders and error types. Concrete backends live in
//! the `articles` crate.

pub mod article;
pub mod cache;
pub mod storage;
