mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{
    article_key, author_articles_partition, ARTICLE_PARTITION, ARTICLE_PREFIX, COLLECTION_MARKER,
};
pub use serialization::{deserialize_value, serialize_value, SerializationError};
pub use traits::Cache;
