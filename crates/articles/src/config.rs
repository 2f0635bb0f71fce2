use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Cache TTL in seconds, 0 disables expiry (default: 0)
    pub cache_ttl_seconds: u64,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// DynamoDB table name (default: "articles")
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub dynamodb_table_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 0, no expiry)
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `DYNAMODB_TABLE_NAME` - DynamoDB table name (default: "articles")
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://localhost:6379".to_string()),
            dynamodb_table_name: lookup("DYNAMODB_TABLE_NAME")
                .unwrap_or_else(|| "articles".to_string()),
        }
    }

    /// Get cache TTL as a Duration, or None when entries never expire.
    pub fn cache_ttl(&self) -> Option<Duration> {
        (self.cache_ttl_seconds > 0).then(|| Duration::from_secs(self.cache_ttl_seconds))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_cache_ttl_conversion() {
        let config = config_from(&[("CACHE_TTL_SECONDS", "600")]);

        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_zero_ttl_disables_expiry() {
        let config = config_from(&[("CACHE_TTL_SECONDS", "0")]);

        assert_eq!(config.cache_ttl(), None);
    }

    #[test]
    fn test_unparsable_ttl_falls_back_to_default() {
        let config = config_from(&[("CACHE_TTL_SECONDS", "soon")]);

        assert_eq!(config.cache_ttl_seconds, 0);
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]);

        assert_eq!(config.cache_ttl_seconds, 0);
        assert_eq!(config.cache_ttl(), None);
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.dynamodb_table_name, "articles");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("REDIS_URL", "redis://cache:6380"),
            ("DYNAMODB_TABLE_NAME", "articles-test"),
        ]);

        assert_eq!(config.redis_url, "redis://cache:6380");
        assert_eq!(config.dynamodb_table_name, "articles-test");
    }
}
