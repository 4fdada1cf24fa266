use std::time::Duration;

use business::application::recipe::orchestrator::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL, DEFAULT_MIN_RESULTS_BEFORE_FALLBACK,
    FallbackStrategy, OrchestratorConfig,
};
use business::domain::shared::cache::CacheConfig;

use super::env_vars::{parse_or, process_env};

pub const DEFAULT_DB_PRIORITY: u32 = 1;

/// Orchestrator tuning plus the store's place in the priority order.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub db_priority: u32,
    pub orchestrator: OrchestratorConfig,
}

impl CatalogConfig {
    /// Environment variables:
    /// - RECIPES_DB_PRIORITY (default: 1)
    /// - RECIPES_MIN_RESULTS_BEFORE_FALLBACK (default: 3)
    /// - RECIPES_FALLBACK_STRATEGY: `threshold` or `query_all` (default: threshold)
    /// - RECIPES_CACHE_TTL_SECS (default: 600, 0 disables the cache)
    /// - RECIPES_CACHE_MAX_ENTRIES (default: 100)
    /// - RECIPES_DISABLE_UNHEALTHY_SOURCES (default: false)
    pub fn from_env() -> Self {
        Self::from_vars(&process_env)
    }

    pub fn from_vars<F: Fn(&str) -> Option<String>>(lookup: &F) -> Self {
        let ttl_secs = parse_or(lookup, "RECIPES_CACHE_TTL_SECS", DEFAULT_CACHE_TTL.as_secs());

        Self {
            db_priority: parse_or(lookup, "RECIPES_DB_PRIORITY", DEFAULT_DB_PRIORITY),
            orchestrator: OrchestratorConfig {
                min_results_before_fallback: parse_or(
                    lookup,
                    "RECIPES_MIN_RESULTS_BEFORE_FALLBACK",
                    DEFAULT_MIN_RESULTS_BEFORE_FALLBACK,
                ),
                fallback_strategy: parse_or(
                    lookup,
                    "RECIPES_FALLBACK_STRATEGY",
                    FallbackStrategy::default(),
                ),
                cache: CacheConfig::new(
                    Duration::from_secs(ttl_secs),
                    parse_or(lookup, "RECIPES_CACHE_MAX_ENTRIES", DEFAULT_CACHE_MAX_ENTRIES),
                ),
                disable_unhealthy_sources: parse_or(
                    lookup,
                    "RECIPES_DISABLE_UNHEALTHY_SOURCES",
                    false,
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_vars::lookup_from;

    #[test]
    fn should_use_defaults_when_nothing_is_set() {
        let config = CatalogConfig::from_vars(&lookup_from(&[]));

        assert_eq!(config.db_priority, 1);
        assert_eq!(config.orchestrator.min_results_before_fallback, 3);
        assert_eq!(
            config.orchestrator.fallback_strategy,
            FallbackStrategy::Threshold
        );
        assert_eq!(config.orchestrator.cache.ttl, Duration::from_secs(600));
        assert_eq!(config.orchestrator.cache.max_entries, 100);
        assert!(!config.orchestrator.disable_unhealthy_sources);
    }

    #[test]
    fn should_read_overrides() {
        let config = CatalogConfig::from_vars(&lookup_from(&[
            ("RECIPES_DB_PRIORITY", "5"),
            ("RECIPES_MIN_RESULTS_BEFORE_FALLBACK", "8"),
            ("RECIPES_FALLBACK_STRATEGY", "query_all"),
            ("RECIPES_CACHE_TTL_SECS", "0"),
            ("RECIPES_CACHE_MAX_ENTRIES", "20"),
            ("RECIPES_DISABLE_UNHEALTHY_SOURCES", "true"),
        ]));

        assert_eq!(config.db_priority, 5);
        assert_eq!(config.orchestrator.min_results_before_fallback, 8);
        assert_eq!(
            config.orchestrator.fallback_strategy,
            FallbackStrategy::QueryAll
        );
        assert!(config.orchestrator.cache.is_disabled());
        assert_eq!(config.orchestrator.cache.max_entries, 20);
        assert!(config.orchestrator.disable_unhealthy_sources);
    }

    #[test]
    fn should_ignore_unknown_strategy() {
        let config = CatalogConfig::from_vars(&lookup_from(&[(
            "RECIPES_FALLBACK_STRATEGY",
            "random",
        )]));

        assert_eq!(
            config.orchestrator.fallback_strategy,
            FallbackStrategy::Threshold
        );
    }
}
