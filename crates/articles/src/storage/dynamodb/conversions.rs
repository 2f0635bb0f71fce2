//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use articles_core::article::{Article, Author};
use articles_core::storage::RepositoryError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::keys;

// ============================================================================
// Entity type constants
// ============================================================================

pub const ENTITY_TYPE_ARTICLE: &str = "ARTICLE";

// ============================================================================
// Author conversions
// ============================================================================

/// Convert an Author to a DynamoDB map attribute.
pub fn author_to_attribute(author: &Author) -> AttributeValue {
    let mut map = HashMap::new();
    map.insert("id".to_string(), AttributeValue::S(author.id.clone()));

    let optional = [
        ("login", &author.login),
        ("name", &author.name),
        ("avatar_url", &author.avatar_url),
        ("html_url", &author.html_url),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            map.insert(name.to_string(), AttributeValue::S(value.clone()));
        }
    }

    AttributeValue::M(map)
}

/// Convert a DynamoDB map attribute to Author.
pub fn attribute_to_author(value: &AttributeValue) -> Result<Author, RepositoryError> {
    let map = value
        .as_m()
        .map_err(|_| RepositoryError::InvalidData("Attribute author is not a map".to_string()))?;

    Ok(Author {
        id: get_string(map, "id")?,
        login: get_optional_string(map, "login"),
        name: get_optional_string(map, "name"),
        avatar_url: get_optional_string(map, "avatar_url"),
        html_url: get_optional_string(map, "html_url"),
    })
}

// ============================================================================
// Article conversions
// ============================================================================

/// Convert an Article to DynamoDB item.
pub fn article_to_item(article: &Article) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        "PK".to_string(),
        AttributeValue::S(keys::article_pk().to_string()),
    );
    item.insert(
        "SK".to_string(),
        AttributeValue::S(keys::article_sk(article.id)),
    );
    item.insert(
        "GSI1PK".to_string(),
        AttributeValue::S(keys::article_gsi1_pk(&article.author.id)),
    );
    item.insert(
        "GSI1SK".to_string(),
        AttributeValue::S(keys::article_gsi1_sk(article.id)),
    );

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_ARTICLE.to_string()),
    );

    // Data
    item.insert("id".to_string(), AttributeValue::S(article.id.to_string()));
    item.insert(
        "authorId".to_string(),
        AttributeValue::S(article.author.id.clone()),
    );
    item.insert("author".to_string(), author_to_attribute(&article.author));
    item.insert("title".to_string(), AttributeValue::S(article.title.clone()));
    if let Some(body) = &article.body {
        item.insert("body".to_string(), AttributeValue::S(body.clone()));
    }
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(article.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        AttributeValue::S(article.updated_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to Article.
pub fn item_to_article(item: &HashMap<String, AttributeValue>) -> Result<Article, RepositoryError> {
    let author = item
        .get("author")
        .ok_or_else(|| RepositoryError::InvalidData("Missing attribute: author".to_string()))
        .and_then(attribute_to_author)?;

    Ok(Article {
        id: get_uuid(item, "id")?,
        author,
        title: get_string(item, "title")?,
        body: get_optional_string(item, "body"),
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
    })
}

// ============================================================================
// Attribute helpers
// ============================================================================

fn get_string(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String, RepositoryError> {
    item.get(name)
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing attribute: {name}")))?
        .as_s()
        .map(|s| s.to_string())
        .map_err(|_| RepositoryError::InvalidData(format!("Attribute {name} is not a string")))
}

fn get_optional_string(item: &HashMap<String, AttributeValue>, name: &str) -> Option<String> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

fn get_uuid(item: &HashMap<String, AttributeValue>, name: &str) -> Result<Uuid, RepositoryError> {
    let value = get_string(item, name)?;
    Uuid::parse_str(&value)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID in {name}: {e}")))
}

fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    name: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let value = get_string(item, name)?;
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime in {name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use articles_core::article::ArticleData;
    use chrono::TimeZone;

    fn test_article() -> Article {
        let timestamp = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        Article {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap(),
            author: Author::new("u1").with_name("A").with_login("a"),
            title: "Hi".to_string(),
            body: Some("Hello".to_string()),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    #[test]
    fn test_article_item_keys() {
        let item = article_to_item(&test_article());

        assert_eq!(item["PK"], AttributeValue::S("ARTICLE".to_string()));
        assert_eq!(
            item["SK"],
            AttributeValue::S("ARTICLE#550e8400-e29b-41d4-a716-446655440003".to_string())
        );
        assert_eq!(item["GSI1PK"], AttributeValue::S("USER#u1".to_string()));
        assert_eq!(item["authorId"], AttributeValue::S("u1".to_string()));
        assert_eq!(item["entityType"], AttributeValue::S("ARTICLE".to_string()));
    }

    #[test]
    fn test_article_item_conversion() {
        let article = test_article();

        let decoded = item_to_article(&article_to_item(&article)).unwrap();

        assert_eq!(decoded, article);
    }

    #[test]
    fn test_article_without_body_has_no_body_attribute() {
        let article = Article::new(Author::new("u1"), ArticleData::new("Hi"));

        let item = article_to_item(&article);

        assert!(!item.contains_key("body"));
        let author = item["author"].as_m().unwrap();
        assert_eq!(author.len(), 1);
        assert_eq!(item_to_article(&item).unwrap().body, None);
    }

    #[test]
    fn test_item_missing_title_is_invalid() {
        let mut item = article_to_item(&test_article());
        item.remove("title");

        let result = item_to_article(&item);

        assert_eq!(
            result,
            Err(RepositoryError::InvalidData(
                "Missing attribute: title".to_string()
            ))
        );
    }

    #[test]
    fn test_item_with_bad_uuid_is_invalid() {
        let mut item = article_to_item(&test_article());
        item.insert("id".to_string(), AttributeValue::S("nope".to_string()));

        assert!(matches!(
            item_to_article(&item),
            Err(RepositoryError::InvalidData(_))
        ));
    }
}
