//! Tests for lookup result caching.

use saucebot_cache::{CacheLookup, Fingerprint, LookupCache, LookupCacheConfig, LookupCacheConfigBuilder};
use saucebot_core::{SourceInfoBuilder, SourceResult};
use std::sync::Arc;
use std::time::Duration;

fn source(title: &str) -> SourceResult {
    SourceResult::Generic(
        SourceInfoBuilder::default()
            .index_id(5u32)
            .index_name("Pixiv Images")
            .title(title)
            .source_url("https://www.pixiv.net/artworks/1")
            .similarity(90.0f32)
            .build()
            .expect("Valid source info"),
    )
}

fn key(n: u32) -> Fingerprint {
    Fingerprint::from_url(&format!("https://pbs.twimg.com/media/{n}.jpg"))
}

#[test]
fn test_cache_miss() {
    let cache = LookupCache::default();
    assert_eq!(cache.get(&key(1)), CacheLookup::Miss);
    assert!(!cache.get(&key(1)).is_cached());
}

#[test]
fn test_cache_hit_returns_source() {
    let cache = LookupCache::default();
    cache.put(key(1), Some(source("Sunset")));

    assert_eq!(cache.get(&key(1)), CacheLookup::Hit(source("Sunset")));
}

#[test]
fn test_cached_absent_is_distinct_from_miss() {
    let cache = LookupCache::default();
    cache.put(key(1), None);

    let lookup = cache.get(&key(1));
    assert_eq!(lookup, CacheLookup::Absent);
    assert!(lookup.is_cached());
}

#[test]
fn test_last_write_wins() {
    let cache = LookupCache::default();
    cache.put(key(1), None);
    cache.put(key(1), Some(source("Second")));

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&key(1)), CacheLookup::Hit(source("Second")));
}

#[tokio::test(start_paused = true)]
async fn test_entries_expire_after_retention_window() {
    let cache = LookupCache::new(LookupCacheConfig::default());
    cache.put(key(1), Some(source("Sunset")));

    tokio::time::advance(Duration::from_secs(23 * 60 * 60)).await;
    assert!(cache.get(&key(1)).is_cached());

    tokio::time::advance(Duration::from_secs(60 * 60)).await;
    assert_eq!(cache.get(&key(1)), CacheLookup::Miss);
    assert!(cache.is_empty(), "Expired entry should be removed on read");
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired_sweeps_stale_entries() {
    let config = LookupCacheConfigBuilder::default()
        .retention_secs(60u64)
        .build()
        .expect("Valid config");
    let cache = LookupCache::new(config);

    cache.put(key(1), None);
    cache.put(key(2), Some(source("Old")));
    tokio::time::advance(Duration::from_secs(61)).await;
    cache.put(key(3), Some(source("Fresh")));

    assert_eq!(cache.purge_expired(), 2);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&key(3)), CacheLookup::Hit(source("Fresh")));
}

#[test]
fn test_capacity_evicts_least_recently_used() {
    let config = LookupCacheConfig::default().with_max_entries(2);
    let cache = LookupCache::new(config);

    cache.put(key(1), None);
    cache.put(key(2), None);

    // Touch key 1 so key 2 becomes least recently used
    assert!(cache.get(&key(1)).is_cached());

    cache.put(key(3), None);

    assert_eq!(cache.len(), 2);
    assert!(cache.get(&key(1)).is_cached());
    assert_eq!(cache.get(&key(2)), CacheLookup::Miss);
    assert!(cache.get(&key(3)).is_cached());
}

#[tokio::test(start_paused = true)]
async fn test_capacity_prefers_evicting_expired_entries() {
    let config = LookupCacheConfigBuilder::default()
        .retention_secs(60u64)
        .max_entries(2usize)
        .build()
        .expect("Valid config");
    let cache = LookupCache::new(config);

    cache.put(key(1), None);
    tokio::time::advance(Duration::from_secs(30)).await;
    cache.put(key(2), None);
    tokio::time::advance(Duration::from_secs(31)).await;

    // key 1 is expired, key 2 is still fresh
    cache.put(key(3), None);

    assert!(cache.get(&key(2)).is_cached());
    assert!(cache.get(&key(3)).is_cached());
}

#[test]
fn test_clear() {
    let cache = LookupCache::default();
    cache.put(key(1), None);
    cache.put(key(2), None);

    cache.clear();
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_concurrent_access_from_tasks() {
    let cache = Arc::new(LookupCache::default());

    let handles: Vec<_> = (0..4)
        .map(|task| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                for n in 0..50 {
                    let k = key(task * 100 + n);
                    cache.put(k.clone(), None);
                    assert!(cache.get(&k).is_cached());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("Task should not panic");
    }

    assert_eq!(cache.len(), 200);
}
