use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::article_key;

use super::{ArticleData, Author};

/// A published article owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// UUID v7, so sort keys built from it order by creation time.
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Creates a new article for `author` from the submitted data.
    pub fn new(author: Author, data: ArticleData) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            author,
            title: data.title,
            body: data.body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with every writable field replaced by `data`.
    pub fn with_data(&self, data: ArticleData) -> Self {
        Self {
            title: data.title,
            body: data.body,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Sets a specific ID for this article (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Returns the sort key identifying this article within any partition.
    pub fn sort_key(&self) -> String {
        article_key(self.id)
    }

    /// Returns true if `owner_id` is the author of this article.
    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.author.id == owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_article_serializes_projected_author() {
        let article = Article::new(Author::new("u1").with_name("A"), ArticleData::new("Hi"));

        let value = serde_json::to_value(&article).unwrap();

        assert_eq!(value["author"], json!({ "id": "u1", "name": "A" }));
        assert_eq!(value["title"], json!("Hi"));
        assert!(value.get("body").is_none());
        assert!(value.get("token").is_none());
        assert_eq!(article.created_at, article.updated_at);
    }

    #[test]
    fn test_with_data_overwrites_fields() {
        let article = Article::new(
            Author::new("u1"),
            ArticleData::new("Draft").with_body("first version"),
        );

        let updated = article.with_data(ArticleData::new("Final"));

        assert_eq!(updated.id, article.id);
        assert_eq!(updated.author, article.author);
        assert_eq!(updated.title, "Final");
        assert_eq!(updated.body, None);
        assert_eq!(updated.created_at, article.created_at);
        assert!(updated.updated_at >= article.updated_at);
    }

    #[test]
    fn test_sort_key_uses_article_prefix() {
        let id = Uuid::parse_str("0190b4a2-7c3e-7d2a-9b1e-3f6a8c0d1e2f").unwrap();
        let article = Article::new(Author::new("u1"), ArticleData::new("Hi")).with_id(id);

        assert_eq!(
            article.sort_key(),
            "ARTICLE#0190b4a2-7c3e-7d2a-9b1e-3f6a8c0d1e2f"
        );
    }

    #[test]
    fn test_sort_keys_follow_creation_order() {
        let first = Article::new(Author::new("u1"), ArticleData::new("one"));
        let second = Article::new(Author::new("u1"), ArticleData::new("two"));

        assert!(first.sort_key() < second.sort_key());
    }

    #[test]
    fn test_is_owned_by() {
        let article = Article::new(Author::new("u1"), ArticleData::new("Hi"));

        assert!(article.is_owned_by("u1"));
        assert!(!article.is_owned_by("u2"));
    }
}
