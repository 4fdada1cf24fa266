use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// TTL and size ceiling for a [`ResponseCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub ttl: Duration,
    /// Entry count above which an insert triggers a cleanup sweep.
    pub max_entries: usize,
}

impl CacheConfig {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self { ttl, max_entries }
    }

    /// A zero TTL turns the cache into a pass-through.
    pub fn is_disabled(&self) -> bool {
        self.ttl.is_zero()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    payload: V,
    cached_at: Instant,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_stale(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

/// In-memory TTL cache keyed by operation name plus serialized arguments.
///
/// Stale entries are evicted lazily when read, and swept in bulk once the
/// map grows past `max_entries`. If the sweep alone does not bring the map
/// back under the ceiling, the oldest entries go next.
pub struct ResponseCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    config: CacheConfig,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        if self.config.is_disabled() {
            return None;
        }

        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        let stale = match entries.get(key) {
            Some(entry) if !entry.is_stale(now) => return Some(entry.payload.clone()),
            Some(_) => true,
            None => false,
        };
        if stale {
            entries.remove(key);
        }
        None
    }

    pub async fn insert(&self, key: String, payload: V) {
        if self.config.is_disabled() {
            return;
        }

        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.insert(
            key,
            CacheEntry {
                payload,
                cached_at: now,
                expires_at: now + self.config.ttl,
            },
        );

        if entries.len() > self.config.max_entries {
            entries.retain(|_, entry| !entry.is_stale(now));
            while entries.len() > self.config.max_entries {
                let oldest = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.cached_at)
                    .map(|(key, _)| key.clone());
                match oldest {
                    Some(key) => {
                        entries.remove(&key);
                    }
                    None => break,
                }
            }
        }
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

/// Builds a cache key as `"<operation>:<json arguments>"`.
pub fn cache_key<A: Serialize + ?Sized>(operation: &str, args: &A) -> String {
    let serialized = serde_json::to_string(args).unwrap_or_default();
    format!("{}:{}", operation, serialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(ttl_secs: u64, max_entries: usize) -> ResponseCache<String> {
        ResponseCache::new(CacheConfig::new(
            Duration::from_secs(ttl_secs),
            max_entries,
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn should_return_payload_while_entry_is_fresh() {
        let cache = cache(60, 10);
        cache.insert("search:pasta".to_string(), "hit".to_string()).await;

        tokio::time::advance(Duration::from_secs(60)).await;

        assert_eq!(cache.get("search:pasta").await, Some("hit".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn should_evict_entry_lazily_once_stale() {
        let cache = cache(60, 10);
        cache.insert("search:pasta".to_string(), "hit".to_string()).await;

        tokio::time::advance(Duration::from_secs(61)).await;

        assert_eq!(cache.get("search:pasta").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn should_sweep_expired_entries_when_ceiling_is_crossed() {
        let cache = cache(60, 2);
        cache.insert("a".to_string(), "1".to_string()).await;
        cache.insert("b".to_string(), "2".to_string()).await;

        tokio::time::advance(Duration::from_secs(61)).await;
        cache.insert("c".to_string(), "3".to_string()).await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("c").await, Some("3".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn should_drop_oldest_entries_when_sweep_is_not_enough() {
        let cache = cache(600, 2);
        cache.insert("a".to_string(), "1".to_string()).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.insert("b".to_string(), "2".to_string()).await;
        tokio::time::advance(Duration::from_secs(1)).await;
        cache.insert("c".to_string(), "3".to_string()).await;

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, Some("2".to_string()));
    }

    #[tokio::test]
    async fn should_not_store_anything_when_ttl_is_zero() {
        let cache = cache(0, 10);
        cache.insert("a".to_string(), "1".to_string()).await;

        assert_eq!(cache.get("a").await, None);
        assert!(cache.is_empty().await);
    }

    #[test]
    fn should_prefix_serialized_arguments_with_operation() {
        assert_eq!(cache_key("get_recipe", "db-1"), "get_recipe:\"db-1\"");
        assert_eq!(cache_key("search", &("pasta", 3)), "search:[\"pasta\",3]");
    }
}
