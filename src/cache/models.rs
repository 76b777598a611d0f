//! Cache configuration and statistics models.

use std::time::Duration;

/// Configuration for the result caching system.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether caching is enabled.
    pub enabled: bool,
    /// How long a cached result stays valid after insertion.
    pub ttl: Duration,
    /// Maximum number of live cache entries to keep.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    /// Provides default values for cache configuration.
    ///
    /// - `enabled`: true
    /// - `ttl`: 3600 seconds
    /// - `max_entries`: 256
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(3600),
            max_entries: 256,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            ttl: Duration::from_secs(settings.ttl_seconds),
            max_entries: settings.max_entries,
        }
    }
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of successful cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries inserted.
    pub inserts: u64,
    /// Number of live (non-expired, non-evicted) entries.
    pub entries: usize,
}
