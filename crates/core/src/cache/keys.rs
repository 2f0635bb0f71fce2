use uuid::Uuid;

/// Partition holding every article.
pub const ARTICLE_PARTITION: &str = "ARTICLE";

/// Prefix of every article sort key.
pub const ARTICLE_PREFIX: &str = "ARTICLE#";

/// Reserved field marking a partition as a fully loaded collection.
///
/// Sort keys always start with a type prefix such as [`ARTICLE_PREFIX`], so
/// this field never collides with a record.
pub const COLLECTION_MARKER: &str = "#loaded";

/// Returns the sort key of an article.
///
/// The same key addresses the article in the global partition and in its
/// author's partition.
pub fn article_key(article_id: Uuid) -> String {
    format!("{ARTICLE_PREFIX}{article_id}")
}

/// Returns the partition holding the articles of one author.
pub fn author_articles_partition(author_id: &str) -> String {
    format!("USER#{author_id}#ARTICLE")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_key() {
        let key = article_key(Uuid::nil());
        assert_eq!(key, "ARTICLE#00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_author_articles_partition() {
        assert_eq!(author_articles_partition("u1"), "USER#u1#ARTICLE");
        assert_eq!(author_articles_partition("583231"), "USER#583231#ARTICLE");
    }

    #[test]
    fn test_marker_is_not_an_article_key() {
        assert!(!COLLECTION_MARKER.starts_with(ARTICLE_PREFIX));
        assert!(article_key(Uuid::nil()).starts_with(ARTICLE_PREFIX));
    }
}
