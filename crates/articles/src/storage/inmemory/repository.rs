//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use articles_core::article::{Article, ArticleData, Author};
use articles_core::storage::{ArticleRepository, RepositoryError, Result, ARTICLE_ENTITY};

/// In-memory storage backend for testing.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    articles: Arc<RwLock<HashMap<Uuid, Article>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            articles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Inserts an article as-is, bypassing `save` (useful for seeding tests).
    pub async fn insert(&self, article: Article) {
        self.articles.write().await.insert(article.id, article);
    }
}

/// Sorts articles the way the store's sort key orders them.
fn by_sort_key(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by_key(|a| a.sort_key());
    articles
}

#[async_trait]
impl ArticleRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        Ok(by_sort_key(articles.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.get(&id).cloned())
    }

    async fn find_by_author(&self, author_id: &str) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        Ok(by_sort_key(
            articles
                .values()
                .filter(|a| a.is_owned_by(author_id))
                .cloned()
                .collect(),
        ))
    }

    async fn save(&self, author: &Author, data: &ArticleData) -> Result<Article> {
        let article = Article::new(author.clone(), data.clone());
        let mut articles = self.articles.write().await;
        if articles.contains_key(&article.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: ARTICLE_ENTITY,
                id: article.id.to_string(),
            });
        }
        articles.insert(article.id, article.clone());
        Ok(article)
    }

    async fn update(&self, owner_id: &str, id: Uuid, data: &ArticleData) -> Result<Article> {
        let mut articles = self.articles.write().await;
        let slot = articles
            .get_mut(&id)
            .filter(|a| a.is_owned_by(owner_id))
            .ok_or_else(|| RepositoryError::article_not_found(id))?;
        *slot = slot.with_data(data.clone());
        Ok(slot.clone())
    }

    async fn destroy(&self, owner_id: &str, id: Uuid) -> Result<Article> {
        let mut articles = self.articles.write().await;
        if !articles.get(&id).is_some_and(|a| a.is_owned_by(owner_id)) {
            return Err(RepositoryError::article_not_found(id));
        }
        articles
            .remove(&id)
            .ok_or_else(|| RepositoryError::article_not_found(id))
    }
}
