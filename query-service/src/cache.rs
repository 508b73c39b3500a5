//! Process-local `(query, k) -> results` cache with LRU eviction and lazy TTL expiry.
//!
//! Grounded in the design notes' "explicit ordered map + mutex" guidance: `lru::LruCache` is an
//! ordered map with O(1) `get`/`put`/`pop_lru`, so capacity eviction is O(1) amortized without a
//! hand-rolled linked list. The mutex is held only across the map operation itself, never across
//! a network call.
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;
use query_client::SearchMatch;

#[derive(Clone)]
struct CacheEntry {
    results: Vec<SearchMatch>,
    stored_at: Instant,
}

/// Shared `(query,k) -> results` cache. Safe for concurrent access; a single mutex guards the
/// map, never held across a [`query_client::QueryClient`] call.
pub struct SearchCache {
    inner: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl SearchCache {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(1)).expect("max(1) is never zero");
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    /// Deterministic, non-cryptographic key for `(normalize(q), k)`.
    pub fn key_for(q: &str, k: usize) -> String {
        let composed = format!("{}|{}", q.trim().to_lowercase(), k);
        let mut hasher = DefaultHasher::new();
        composed.hash(&mut hasher);
        hasher.finish().to_string()
    }

    /// Returns the cached results for `key` if present and not yet past TTL. An expired entry
    /// is evicted on this read (lazy expiry), not served.
    pub fn get(&self, key: &str) -> Option<Vec<SearchMatch>> {
        let mut guard = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        let hit = guard
            .get(key)
            .filter(|entry| entry.stored_at.elapsed() <= self.ttl)
            .map(|entry| entry.results.clone());
        if hit.is_none() {
            guard.pop(key);
        }
        hit
    }

    pub fn put(&self, key: String, results: Vec<SearchMatch>) {
        let mut guard = self.inner.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.put(
            key,
            CacheEntry {
                results,
                stored_at: Instant::now(),
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match(chunk_id: &str) -> SearchMatch {
        SearchMatch {
            chunk_id: chunk_id.to_string(),
            score: 1.0,
            content: String::new(),
            metadata: serde_json::Map::new(),
        }
    }

    #[test]
    fn key_is_case_and_whitespace_insensitive() {
        assert_eq!(
            SearchCache::key_for("  Machine Learning ", 5),
            SearchCache::key_for("machine learning", 5)
        );
        assert_ne!(SearchCache::key_for("machine learning", 5), SearchCache::key_for("machine learning", 6));
    }

    #[test]
    fn miss_then_hit() {
        let cache = SearchCache::new(10, Duration::from_secs(300));
        let key = SearchCache::key_for("q", 2);
        assert!(cache.get(&key).is_none());
        cache.put(key.clone(), vec![sample_match("c1")]);
        assert_eq!(cache.get(&key).unwrap()[0].chunk_id, "c1");
    }

    #[test]
    fn expired_entry_is_evicted_on_read() {
        let cache = SearchCache::new(10, Duration::from_millis(10));
        let key = SearchCache::key_for("q", 2);
        cache.put(key.clone(), vec![sample_match("c1")]);
        std::thread::sleep(Duration::from_millis(30));
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn capacity_overflow_evicts_least_recently_used() {
        let cache = SearchCache::new(2, Duration::from_secs(300));
        let k1 = SearchCache::key_for("q1", 1);
        let k2 = SearchCache::key_for("q2", 1);
        let k3 = SearchCache::key_for("q3", 1);

        cache.put(k1.clone(), vec![sample_match("c1")]);
        cache.put(k2.clone(), vec![sample_match("c2")]);
        cache.put(k3.clone(), vec![sample_match("c3")]);

        assert!(cache.get(&k1).is_none());
        assert!(cache.get(&k2).is_some());
        assert!(cache.get(&k3).is_some());
    }
}
