use std::time::Duration;

use business::domain::shared::cache::CacheConfig;
use spoonacular::client::DEFAULT_BASE_URL;
use spoonacular::recipe_source::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL, DEFAULT_PRIORITY, SpoonacularSettings,
};

use super::env_vars::{parse_or, process_env};

/// Configuration for Spoonacular API access.
///
/// An empty API key leaves the source registered but disabled.
#[derive(Debug, Clone)]
pub struct SpoonacularConfig {
    pub api_key: String,
    pub base_url: String,
    pub priority: u32,
    pub cache_ttl: Duration,
}

impl SpoonacularConfig {
    /// Environment variables:
    /// - SPOONACULAR_API_KEY (optional)
    /// - SPOONACULAR_BASE_URL (default: https://api.spoonacular.com)
    /// - SPOONACULAR_PRIORITY (default: 2)
    /// - SPOONACULAR_CACHE_TTL_SECS (default: 86400)
    pub fn from_env() -> Self {
        Self::from_vars(&process_env)
    }

    pub fn from_vars<F: Fn(&str) -> Option<String>>(lookup: &F) -> Self {
        Self {
            api_key: lookup("SPOONACULAR_API_KEY").unwrap_or_default(),
            base_url: lookup("SPOONACULAR_BASE_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            priority: parse_or(lookup, "SPOONACULAR_PRIORITY", DEFAULT_PRIORITY),
            cache_ttl: Duration::from_secs(parse_or(
                lookup,
                "SPOONACULAR_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL.as_secs(),
            )),
        }
    }

    pub fn settings(&self) -> SpoonacularSettings {
        SpoonacularSettings {
            priority: self.priority,
            cache: CacheConfig::new(self.cache_ttl, DEFAULT_CACHE_MAX_ENTRIES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_vars::lookup_from;

    #[test]
    fn should_default_to_public_api_with_day_long_cache() {
        let config = SpoonacularConfig::from_vars(&lookup_from(&[]));

        assert!(config.api_key.is_empty());
        assert_eq!(config.base_url, "https://api.spoonacular.com");
        assert_eq!(config.settings().priority, 2);
        assert_eq!(config.settings().cache.ttl, Duration::from_secs(86_400));
        assert_eq!(config.settings().cache.max_entries, 500);
    }

    #[test]
    fn should_read_key_and_overrides() {
        let config = SpoonacularConfig::from_vars(&lookup_from(&[
            ("SPOONACULAR_API_KEY", "secret"),
            ("SPOONACULAR_BASE_URL", "http://localhost:9000"),
            ("SPOONACULAR_PRIORITY", "7"),
            ("SPOONACULAR_CACHE_TTL_SECS", "60"),
        ]));

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.priority, 7);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }
}
