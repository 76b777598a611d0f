// TTL-bounded result store with lazy expiry

use crate::cache::models::{CacheConfig, CacheStats};
use crate::utils::clock::Clock;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

#[derive(Default)]
struct Counters {
    hits: u64,
    misses: u64,
    inserts: u64,
}

/// In-memory cache with per-entry TTL expiry and LRU eviction at capacity.
///
/// Expiry is lazy: an entry past its TTL is dropped when it is next read.
/// Expired entries are never returned. Reads and inserts from concurrent
/// tasks are safe; an insert is visible to every subsequent read.
pub struct TtlCache<V> {
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    entries: Mutex<LruCache<String, Entry<V>>>,
    counters: Mutex<Counters>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        let capacity =
            NonZeroUsize::new(config.max_entries.max(1)).expect("capacity is at least 1");
        Self {
            config,
            clock,
            entries: Mutex::new(LruCache::new(capacity)),
            counters: Mutex::new(Counters::default()),
        }
    }

    /// Look up a non-expired entry, recording a hit or a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        let (value, expired) = match entries.get(key) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.config.ttl => {
                (Some(entry.value.clone()), false)
            }
            Some(_) => (None, true),
            None => (None, false),
        };

        if expired {
            // Lazy eviction: drop the stale entry on the way out
            entries.pop(key);
        }
        drop(entries);

        let mut counters = self.counters.lock();
        match value {
            Some(value) => {
                counters.hits += 1;
                debug!(key = %short_key(key), "cache hit");
                Some(value)
            }
            None => {
                counters.misses += 1;
                if expired {
                    debug!(key = %short_key(key), "cache entry expired");
                } else {
                    debug!(key = %short_key(key), "cache miss");
                }
                None
            }
        }
    }

    /// Insert a value under `key` with a fresh TTL. The least-recently-used
    /// entry is evicted if the store is at capacity.
    pub fn insert(&self, key: String, value: V) {
        let entry = Entry {
            value,
            inserted_at: self.clock.now(),
        };
        debug!(key = %short_key(&key), "cache insert");
        self.entries.lock().push(key, entry);
        self.counters.lock().inserts += 1;
    }

    /// Current counters and live entry count.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().len();
        let counters = self.counters.lock();
        CacheStats {
            hits: counters.hits,
            misses: counters.misses,
            inserts: counters.inserts,
            entries,
        }
    }

    /// Number of stored entries (expired-but-unread entries included).
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every entry. Counters are preserved.
    pub fn clear(&self) {
        self.entries.lock().clear();
        debug!("cache cleared");
    }
}

fn short_key(key: &str) -> &str {
    &key[..key.len().min(16)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::ManualClock;
    use std::time::Duration;

    fn store(ttl_secs: u64, max_entries: usize) -> (TtlCache<String>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let config = CacheConfig {
            enabled: true,
            ttl: Duration::from_secs(ttl_secs),
            max_entries,
        };
        (TtlCache::new(config, clock.clone()), clock)
    }

    #[test]
    fn test_insert_then_get() {
        let (cache, _clock) = store(60, 10);
        cache.insert("k1".to_string(), "v1".to_string());
        assert_eq!(cache.get("k1"), Some("v1".to_string()));
    }

    #[test]
    fn test_expired_entry_is_not_returned() {
        let (cache, clock) = store(60, 10);
        cache.insert("k1".to_string(), "v1".to_string());
        clock.advance(Duration::from_secs(60));
        assert_eq!(cache.get("k1"), None);
        // Lazy eviction dropped the entry
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entry_survives_within_ttl() {
        let (cache, clock) = store(60, 10);
        cache.insert("k1".to_string(), "v1".to_string());
        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get("k1"), Some("v1".to_string()));
    }

    #[test]
    fn test_reinsert_refreshes_ttl() {
        let (cache, clock) = store(60, 10);
        cache.insert("k1".to_string(), "v1".to_string());
        clock.advance(Duration::from_secs(40));
        cache.insert("k1".to_string(), "v2".to_string());
        clock.advance(Duration::from_secs(40));
        // 80s after the first insert but only 40s after the refresh
        assert_eq!(cache.get("k1"), Some("v2".to_string()));
    }

    #[test]
    fn test_lru_eviction_at_capacity() {
        let (cache, _clock) = store(60, 2);
        cache.insert("k1".to_string(), "v1".to_string());
        cache.insert("k2".to_string(), "v2".to_string());
        // Touch k1 so k2 becomes the eviction candidate
        assert!(cache.get("k1").is_some());
        cache.insert("k3".to_string(), "v3".to_string());
        assert_eq!(cache.len(), 2);
        assert!(cache.get("k2").is_none());
        assert!(cache.get("k1").is_some());
        assert!(cache.get("k3").is_some());
    }

    #[test]
    fn test_stats_track_operations() {
        let (cache, _clock) = store(60, 10);
        cache.insert("k1".to_string(), "v1".to_string());
        cache.get("k1");
        cache.get("missing");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_clear_preserves_counters() {
        let (cache, _clock) = store(60, 10);
        cache.insert("k1".to_string(), "v1".to_string());
        cache.get("k1");
        cache.clear();

        let stats = cache.stats();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.inserts, 1);
        assert_eq!(cache.get("k1"), None);
    }
}
