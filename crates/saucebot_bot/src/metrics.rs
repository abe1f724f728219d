//! Metrics collection for bot operations.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector shared by the monitors and the resolver.
#[derive(Debug, Clone)]
pub struct BotMetrics {
    inner: Arc<BotMetricsInner>,
}

#[derive(Debug)]
struct BotMetricsInner {
    // Post handling
    posts_seen: AtomicU64,
    replies_sent: AtomicU64,
    no_media_skips: AtomicU64,
    failures: AtomicU64,

    // Source resolution
    cache_hits: AtomicU64,
    remote_lookups: AtomicU64,
    rate_limit_backoffs: AtomicU64,

    last_reply: parking_lot::Mutex<Option<Instant>>,
}

impl Default for BotMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl BotMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BotMetricsInner {
                posts_seen: AtomicU64::new(0),
                replies_sent: AtomicU64::new(0),
                no_media_skips: AtomicU64::new(0),
                failures: AtomicU64::new(0),
                cache_hits: AtomicU64::new(0),
                remote_lookups: AtomicU64::new(0),
                rate_limit_backoffs: AtomicU64::new(0),
                last_reply: parking_lot::Mutex::new(None),
            }),
        }
    }

    /// Records a post taken from a stream.
    pub fn record_post_seen(&self) {
        self.inner.posts_seen.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a published reply.
    pub fn record_reply(&self) {
        self.inner.replies_sent.fetch_add(1, Ordering::Relaxed);
        *self.inner.last_reply.lock() = Some(Instant::now());
    }

    /// Records a post skipped for lack of media.
    pub fn record_no_media(&self) {
        self.inner.no_media_skips.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a post whose processing failed.
    pub fn record_failure(&self) {
        self.inner.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a resolution answered from the cache.
    pub fn record_cache_hit(&self) {
        self.inner.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a call to the lookup service.
    pub fn record_remote_lookup(&self) {
        self.inner.remote_lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a rate limit backoff.
    pub fn record_backoff(&self) {
        self.inner.rate_limit_backoffs.fetch_add(1, Ordering::Relaxed);
    }

    /// Posts seen.
    pub fn posts_seen(&self) -> u64 {
        self.inner.posts_seen.load(Ordering::Relaxed)
    }

    /// Replies sent.
    pub fn replies_sent(&self) -> u64 {
        self.inner.replies_sent.load(Ordering::Relaxed)
    }

    /// Posts skipped for lack of media.
    pub fn no_media_skips(&self) -> u64 {
        self.inner.no_media_skips.load(Ordering::Relaxed)
    }

    /// Failed posts.
    pub fn failures(&self) -> u64 {
        self.inner.failures.load(Ordering::Relaxed)
    }

    /// Cache hits.
    pub fn cache_hits(&self) -> u64 {
        self.inner.cache_hits.load(Ordering::Relaxed)
    }

    /// Lookup service calls.
    pub fn remote_lookups(&self) -> u64 {
        self.inner.remote_lookups.load(Ordering::Relaxed)
    }

    /// Rate limit backoffs.
    pub fn rate_limit_backoffs(&self) -> u64 {
        self.inner.rate_limit_backoffs.load(Ordering::Relaxed)
    }

    /// Time since the last reply.
    pub fn time_since_reply(&self) -> Option<std::time::Duration> {
        self.inner.last_reply.lock().map(|instant| instant.elapsed())
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            posts_seen: self.posts_seen(),
            replies_sent: self.replies_sent(),
            no_media_skips: self.no_media_skips(),
            failures: self.failures(),
            cache_hits: self.cache_hits(),
            remote_lookups: self.remote_lookups(),
            rate_limit_backoffs: self.rate_limit_backoffs(),
            seconds_since_reply: self.time_since_reply().map(|d| d.as_secs()),
        }
    }
}

/// Serializable snapshot of bot metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Posts taken from either stream
    pub posts_seen: u64,
    /// Replies published
    pub replies_sent: u64,
    /// Posts without usable media
    pub no_media_skips: u64,
    /// Posts whose processing failed
    pub failures: u64,
    /// Resolutions served from the cache
    pub cache_hits: u64,
    /// Calls to the lookup service
    pub remote_lookups: u64,
    /// Rate limit backoffs taken
    pub rate_limit_backoffs: u64,
    /// Seconds since the last reply
    pub seconds_since_reply: Option<u64>,
}
