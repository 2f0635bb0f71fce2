//! DynamoDB key generation functions.
//!
//! Pure functions for generating partition and sort keys following the single-table design.
//! All functions are sync and have no side effects.

use uuid::Uuid;

// ============================================================================
// Key prefixes
// ============================================================================

pub const USER_PREFIX: &str = "USER#";
pub const ARTICLE_PREFIX: &str = "ARTICLE#";

/// Partition key shared by every article item.
pub const ARTICLE_PK: &str = "ARTICLE";

/// Name of the index keyed by author.
pub const GSI1: &str = "GSI1";

// ============================================================================
// Article keys
// ============================================================================

/// Generate primary key for an Article.
///
/// Pattern: `ARTICLE` (every article lives in one partition for `find_all`)
pub fn article_pk() -> &'static str {
    ARTICLE_PK
}

/// Generate sort key for an Article.
///
/// Pattern: `ARTICLE#<article_id>`
pub fn article_sk(article_id: Uuid) -> String {
    format!("{ARTICLE_PREFIX}{article_id}")
}

/// Generate GSI1 partition key for Article (author lookup).
///
/// Pattern: `USER#<author_id>`
pub fn article_gsi1_pk(author_id: &str) -> String {
    format!("{USER_PREFIX}{author_id}")
}

/// Generate GSI1 sort key for Article.
///
/// Pattern: `ARTICLE#<article_id>`
pub fn article_gsi1_sk(article_id: Uuid) -> String {
    format!("{ARTICLE_PREFIX}{article_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_pk() {
        assert_eq!(article_pk(), "ARTICLE");
    }

    #[test]
    fn test_article_sk() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap();
        assert_eq!(
            article_sk(id),
            "ARTICLE#550e8400-e29b-41d4-a716-446655440003"
        );
    }

    #[test]
    fn test_article_gsi1_keys() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap();
        assert_eq!(article_gsi1_pk("583231"), "USER#583231");
        assert_eq!(article_gsi1_sk(id), article_sk(id));
    }

    #[test]
    fn test_sort_key_matches_cache_key() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap();
        assert_eq!(article_sk(id), articles_core::cache::article_key(id));
    }
}
