//! Pure functions for serializing/deserializing domain types to/from cache bytes.
//!
//! These functions use JSON serialization for cache storage, providing human-readable
//! cache values that are easy to debug and inspect.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a value to JSON bytes.
pub fn serialize_value<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a value.
pub fn deserialize_value<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{Article, ArticleData, Author};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn fixed_article() -> Article {
        let timestamp = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        Article {
            id: Uuid::parse_str("0190b4a2-7c3e-7d2a-9b1e-3f6a8c0d1e2f").unwrap(),
            author: Author::new("u1").with_name("A"),
            title: "Hi".to_string(),
            body: Some("Hello there".to_string()),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    #[test]
    fn test_article_bytes_are_plain_json() {
        let bytes = serialize_value(&fixed_article()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["id"], "0190b4a2-7c3e-7d2a-9b1e-3f6a8c0d1e2f");
        assert_eq!(value["author"]["name"], "A");
        assert_eq!(value["created_at"], "2024-06-15T10:30:00Z");
    }

    #[test]
    fn test_deserialize_article() {
        let article = fixed_article();
        let bytes = serialize_value(&article).unwrap();

        let decoded: Article = deserialize_value(&bytes).unwrap();

        assert_eq!(decoded, article);
    }

    #[test]
    fn test_deserialize_malformed_bytes() {
        let result = deserialize_value::<Article>(b"not valid json");

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_deserialize_wrong_shape() {
        let result = deserialize_value::<Article>(b"[1, 2, 3]");

        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_serialize_unsized_slice() {
        let data = [ArticleData::new("a"), ArticleData::new("b")];

        let bytes = serialize_value(&data[..]).unwrap();

        assert_eq!(bytes, br#"[{"title":"a"},{"title":"b"}]"#);
    }
}
