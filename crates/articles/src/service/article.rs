//! Cache-aside article service.

use std::sync::Arc;

use uuid::Uuid;

use articles_core::article::{Article, ArticleData, Author, Principal};
use articles_core::cache::{article_key, author_articles_partition, ARTICLE_PARTITION};
use articles_core::storage::{ArticleRepository, RepositoryError, Result};

use crate::cache::CacheLayer;

/// Article operations backed by a repository and fronted by a cache.
///
/// Every article lives under the same sort key in two partitions: the global
/// [`ARTICLE_PARTITION`] and its author's partition. Mutations keep both in
/// step; store errors are returned as-is and cache errors never are.
#[derive(Clone)]
pub struct ArticleService {
    repository: Arc<dyn ArticleRepository>,
    cache: CacheLayer,
}

impl ArticleService {
    /// Creates a new article service.
    ///
    /// # Arguments
    ///
    /// * `repository` - The source of truth
    /// * `cache` - The cache layer to serve reads from
    pub fn new(repository: Arc<dyn ArticleRepository>, cache: CacheLayer) -> Self {
        Self { repository, cache }
    }

    /// The cache layer, e.g. to drain pending writes before shutdown.
    pub fn cache(&self) -> &CacheLayer {
        &self.cache
    }

    /// Lists every article, oldest first.
    pub async fn find_all(&self) -> Result<Vec<Article>> {
        self.cache
            .fetch_many(ARTICLE_PARTITION, Article::sort_key, || self.repository.find_all())
            .await
    }

    /// Returns one article, or `NotFound` if the store has no such id.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Article> {
        self.cache
            .fetch_one(ARTICLE_PARTITION, &article_key(id), || async {
                self.repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| RepositoryError::article_not_found(id))
            })
            .await
    }

    /// Lists the articles of one author, oldest first.
    pub async fn find_by_author(&self, author_id: &str) -> Result<Vec<Article>> {
        self.cache
            .fetch_many(
                &author_articles_partition(author_id),
                Article::sort_key,
                || self.repository.find_by_author(author_id),
            )
            .await
    }

    /// Creates an article authored by `principal`.
    ///
    /// Only the public profile of the principal is stored.
    pub async fn save(&self, principal: &Principal, data: &ArticleData) -> Result<Article> {
        let author = Author::from_principal(principal);
        let article = self.repository.save(&author, data).await?;

        self.mirror(&author.id, &article);

        tracing::debug!(article_id = %article.id, author_id = %author.id, "Article created");
        Ok(article)
    }

    /// Replaces the content of an article owned by `owner_id`.
    pub async fn update(&self, owner_id: &str, id: Uuid, data: &ArticleData) -> Result<Article> {
        let article = self.repository.update(owner_id, id, data).await?;

        self.mirror(owner_id, &article);

        tracing::debug!(article_id = %id, owner_id, "Article updated");
        Ok(article)
    }

    /// Deletes an article owned by `owner_id` and returns it.
    pub async fn destroy(&self, owner_id: &str, id: Uuid) -> Result<Article> {
        let article = self.repository.destroy(owner_id, id).await?;

        let key = article_key(id);
        self.cache.forget(ARTICLE_PARTITION, &key);
        self.cache.forget(&author_articles_partition(owner_id), &key);

        tracing::debug!(article_id = %id, owner_id, "Article deleted");
        Ok(article)
    }

    /// Writes `article` into the global and the owner's partition.
    fn mirror(&self, owner_id: &str, article: &Article) {
        let key = article.sort_key();
        self.cache.put(ARTICLE_PARTITION, &key, article);
        self.cache.put(&author_articles_partition(owner_id), &key, article);
    }
}
