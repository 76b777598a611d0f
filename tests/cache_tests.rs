// Cache tests - testing only public APIs

use prompt2image::cache::{fingerprint, CacheConfig, CacheStats, TtlCache};
use prompt2image::utils::clock::ManualClock;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_cache_stats_initialization() {
    let cache: TtlCache<String> = TtlCache::new(CacheConfig::default(), Arc::new(ManualClock::new()));
    let stats = cache.stats();

    assert_eq!(stats, CacheStats::default());
}

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();

    assert!(config.enabled);
    assert_eq!(config.ttl, Duration::from_secs(3600));
    assert_eq!(config.max_entries, 256);
}

#[test]
fn test_expiry_boundary() {
    let clock = Arc::new(ManualClock::new());
    let config = CacheConfig {
        enabled: true,
        ttl: Duration::from_secs(3600),
        max_entries: 16,
    };
    let cache = TtlCache::new(config, clock.clone());

    cache.insert("key".to_string(), 42u64);

    clock.advance(Duration::from_secs(3599));
    assert_eq!(cache.get("key"), Some(42));

    clock.advance(Duration::from_secs(1));
    assert_eq!(cache.get("key"), None);
}

#[test]
fn test_fingerprint_depends_on_every_field() {
    let base = fingerprint("dall-e-3", "1024x1024", "standard", "vivid", "a red fox");

    assert_ne!(
        base,
        fingerprint("dall-e-2", "1024x1024", "standard", "vivid", "a red fox")
    );
    assert_ne!(
        base,
        fingerprint("dall-e-3", "1792x1024", "standard", "vivid", "a red fox")
    );
    assert_ne!(
        base,
        fingerprint("dall-e-3", "1024x1024", "hd", "vivid", "a red fox")
    );
    assert_ne!(
        base,
        fingerprint("dall-e-3", "1024x1024", "standard", "natural", "a red fox")
    );
    assert_ne!(
        base,
        fingerprint("dall-e-3", "1024x1024", "standard", "vivid", "a blue fox")
    );
}

#[test]
fn test_fingerprint_is_stable_across_calls() {
    let key1 = fingerprint("dall-e-3", "1024x1024", "standard", "vivid", "A Red Fox  ");
    let key2 = fingerprint("dall-e-3", "1024x1024", "standard", "vivid", "a red fox");
    assert_eq!(key1, key2);
    // SHA256 hex digest
    assert_eq!(key1.len(), 64);
    assert!(key1.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_concurrent_inserts_are_visible() {
    let cache: Arc<TtlCache<u32>> = Arc::new(TtlCache::new(
        CacheConfig::default(),
        Arc::new(ManualClock::new()),
    ));

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let cache = cache.clone();
            std::thread::spawn(move || {
                cache.insert(format!("key-{}", i), i);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..8u32 {
        assert_eq!(cache.get(&format!("key-{}", i)), Some(i));
    }
    assert_eq!(cache.stats().entries, 8);
}
