//! Lookup result cache implementation.

use crate::Fingerprint;
use derive_getters::Getters;
use parking_lot::Mutex;
use saucebot_core::SourceResult;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;
use tokio::time::Instant;

/// Cache entry with the cached outcome and its expiration.
#[derive(Debug, Clone, Getters)]
pub struct CacheEntry {
    /// `None` records that a previous lookup found nothing.
    result: Option<SourceResult>,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    /// Check if this entry is expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.ttl
    }

    /// Get remaining time until expiration.
    pub fn time_remaining(&self) -> Option<Duration> {
        self.ttl.checked_sub(self.created_at.elapsed())
    }
}

/// Outcome of a cache read.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// A previous lookup found this source.
    Hit(SourceResult),
    /// A previous lookup ran and found nothing.
    Absent,
    /// Never looked up, or the entry expired.
    Miss,
}

impl CacheLookup {
    /// Whether the remote lookup can be skipped.
    pub fn is_cached(&self) -> bool {
        !matches!(self, CacheLookup::Miss)
    }
}

/// Configuration for the lookup cache.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct LookupCacheConfig {
    /// Retention window for cached entries (seconds)
    #[serde(default = "default_retention_secs")]
    #[builder(default = "default_retention_secs()")]
    retention_secs: u64,

    /// Maximum cache size (number of entries)
    #[serde(default = "default_max_entries")]
    #[builder(default = "default_max_entries()")]
    max_entries: usize,

    /// How often the server sweeps expired entries (seconds)
    #[serde(default = "default_sweep_interval_secs")]
    #[builder(default = "default_sweep_interval_secs()")]
    sweep_interval_secs: u64,
}

fn default_retention_secs() -> u64 {
    24 * 60 * 60
}

fn default_max_entries() -> usize {
    10_000
}

fn default_sweep_interval_secs() -> u64 {
    60 * 60
}

impl Default for LookupCacheConfig {
    fn default() -> Self {
        Self {
            retention_secs: default_retention_secs(),
            max_entries: default_max_entries(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl LookupCacheConfig {
    /// Retention window as a duration.
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_secs)
    }

    /// Sweep interval as a duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<Fingerprint, CacheEntry>,
    access_order: VecDeque<Fingerprint>,
}

impl CacheState {
    fn forget(&mut self, key: &Fingerprint) {
        self.entries.remove(key);
        if let Some(pos) = self.access_order.iter().position(|k| k == key) {
            self.access_order.remove(pos);
        }
    }

    fn touch(&mut self, key: &Fingerprint) {
        if let Some(pos) = self.access_order.iter().position(|k| k == key)
            && let Some(key) = self.access_order.remove(pos)
        {
            self.access_order.push_back(key);
        }
    }

    fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let access_order = &mut self.access_order;
        self.entries.retain(|key, entry| {
            let keep = !entry.is_expired();
            if !keep && let Some(pos) = access_order.iter().position(|k| k == key) {
                access_order.remove(pos);
            }
            keep
        });
        before - self.entries.len()
    }
}

/// Memo of reverse image lookups keyed by media fingerprint.
///
/// Entries expire after the retention window. Expired entries are never
/// returned: reads check expiry (passive), and [`LookupCache::purge_expired`]
/// can be called periodically to reclaim memory (active). The cache holds at
/// most `max_entries`; inserting a new key at capacity evicts expired entries
/// first and then the least recently used one.
///
/// The cache is safe to share between tasks behind an `Arc`. The internal
/// lock is never held across an await point.
///
/// # Example
///
/// ```
/// use saucebot_cache::{CacheLookup, Fingerprint, LookupCache, LookupCacheConfig};
///
/// let cache = LookupCache::new(LookupCacheConfig::default());
/// let key = Fingerprint::from_url("https://pbs.twimg.com/media/abc.jpg");
///
/// assert_eq!(cache.get(&key), CacheLookup::Miss);
///
/// // Remember that nothing was found
/// cache.put(key.clone(), None);
/// assert_eq!(cache.get(&key), CacheLookup::Absent);
/// ```
#[derive(Debug)]
pub struct LookupCache {
    config: LookupCacheConfig,
    state: Mutex<CacheState>,
}

impl LookupCache {
    /// Create a new lookup cache with configuration.
    pub fn new(config: LookupCacheConfig) -> Self {
        tracing::debug!(
            retention_secs = config.retention_secs,
            max_entries = config.max_entries,
            "Creating new LookupCache"
        );
        Self {
            config,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Cache configuration.
    pub fn config(&self) -> &LookupCacheConfig {
        &self.config
    }

    /// Record the outcome of a lookup. Last write wins.
    #[tracing::instrument(skip(self, key, result), fields(fingerprint = %key, found = result.is_some()))]
    pub fn put(&self, key: Fingerprint, result: Option<SourceResult>) {
        let mut state = self.state.lock();

        if !state.entries.contains_key(&key) && state.entries.len() >= self.config.max_entries {
            let purged = state.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "Purged expired entries to make room");
            }
            if state.entries.len() >= self.config.max_entries
                && let Some(lru) = state.access_order.pop_front()
            {
                tracing::debug!(fingerprint = %lru, "Evicting LRU entry");
                state.entries.remove(&lru);
            }
        }

        if let Some(pos) = state.access_order.iter().position(|k| k == &key) {
            state.access_order.remove(pos);
        }
        state.access_order.push_back(key.clone());

        let entry = CacheEntry {
            result,
            created_at: Instant::now(),
            ttl: self.config.retention(),
        };
        state.entries.insert(key, entry);

        tracing::debug!(cache_size = state.entries.len(), "Inserted entry into cache");
    }

    /// Read a cached outcome.
    ///
    /// Returns [`CacheLookup::Miss`] if the key was never stored or its entry
    /// has expired (the expired entry is removed).
    #[tracing::instrument(skip(self, key), fields(fingerprint = %key))]
    pub fn get(&self, key: &Fingerprint) -> CacheLookup {
        let mut state = self.state.lock();

        let (expired, outcome) = match state.entries.get(key) {
            None => return CacheLookup::Miss,
            Some(entry) if entry.is_expired() => (true, CacheLookup::Miss),
            Some(entry) => {
                tracing::debug!(time_remaining = ?entry.time_remaining(), "Cache hit");
                let outcome = match entry.result() {
                    Some(source) => CacheLookup::Hit(source.clone()),
                    None => CacheLookup::Absent,
                };
                (false, outcome)
            }
        };

        if expired {
            tracing::debug!("Cache entry expired, removing");
            state.forget(key);
        } else {
            state.touch(key);
        }
        outcome
    }

    /// Remove expired entries from cache.
    pub fn purge_expired(&self) -> usize {
        let mut state = self.state.lock();
        let removed = state.purge_expired();
        if removed > 0 {
            tracing::info!(
                removed,
                remaining = state.entries.len(),
                "Cleaned up expired cache entries"
            );
        }
        removed
    }

    /// Clear all cache entries.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let count = state.entries.len();
        state.entries.clear();
        state.access_order.clear();
        tracing::info!(cleared = count, "Cleared cache");
    }

    /// Get number of cached entries (expired ones included until purged).
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

impl Default for LookupCache {
    fn default() -> Self {
        Self::new(LookupCacheConfig::default())
    }
}
