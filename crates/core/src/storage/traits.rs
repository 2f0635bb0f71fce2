use async_trait::async_trait;
use uuid::Uuid;

use crate::article::{Article, ArticleData, Author};

use super::Result;

/// Repository for article operations.
///
/// This is the source of truth. Ownership is part of the key for writes:
/// `update` and `destroy` fail with [`RepositoryError::NotFound`] when the
/// article does not exist or belongs to another author.
///
/// [`RepositoryError::NotFound`]: super::RepositoryError::NotFound
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Gets every article.
    async fn find_all(&self) -> Result<Vec<Article>>;

    /// Gets an article by its ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>>;

    /// Gets every article written by an author.
    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Article>>;

    /// Creates a new article and returns it as stored.
    async fn save(&self, author: &Author, data: &ArticleData) -> Result<Article>;

    /// Replaces the writable fields of an article and returns it as stored.
    async fn update(&self, owner_id: &str, id: Uuid, data: &ArticleData) -> Result<Article>;

    /// Deletes an article and returns the removed record.
    async fn destroy(&self, owner_id: &str, id: Uuid) -> Result<Article>;
}
