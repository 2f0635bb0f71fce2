//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository trait
//! using `aws-sdk-dynamodb`, on a single table with a `GSI1` index for
//! per-author lookups.

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbRepository;
