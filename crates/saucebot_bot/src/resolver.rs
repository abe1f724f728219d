//! Source resolution with caching and rate limit backoff.

use crate::{BotMetrics, ResolverConfig};
use saucebot_cache::{CacheLookup, Fingerprint, LookupCache};
use saucebot_core::{MediaItem, SourceResult};
use saucebot_interface::SauceLookup;
use std::sync::Arc;
use tokio_retry2::strategy::FixedInterval;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, info, instrument, warn};

/// Resolves media to its source.
///
/// Every resolution consults the [`LookupCache`] first. On a miss the lookup
/// service is called; its outcome (including "nothing found" and failures)
/// is written back to the cache exactly once.
///
/// When the service reports its short-term rate limit the resolver sleeps
/// for the configured backoff and tries again. This loop is unbounded unless
/// [`ResolverConfig::max_rate_limit_retries`] is set, and it only suspends
/// the calling task.
#[derive(Clone)]
pub struct SauceResolver {
    lookup: Arc<dyn SauceLookup>,
    cache: Arc<LookupCache>,
    config: ResolverConfig,
    metrics: BotMetrics,
}

impl std::fmt::Debug for SauceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SauceResolver")
            .field("lookup", &self.lookup.service_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SauceResolver {
    /// Create a resolver.
    pub fn new(
        lookup: Arc<dyn SauceLookup>,
        cache: Arc<LookupCache>,
        config: ResolverConfig,
        metrics: BotMetrics,
    ) -> Self {
        Self {
            lookup,
            cache,
            config,
            metrics,
        }
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<LookupCache> {
        &self.cache
    }

    /// Best source for `media`, or `None` if nothing was found or the lookup
    /// failed.
    #[instrument(skip(self, media), fields(url = %media.url()))]
    pub async fn resolve(&self, media: &MediaItem) -> Option<SourceResult> {
        let fingerprint = Fingerprint::from_url(media.url());

        match self.cache.get(&fingerprint) {
            CacheLookup::Hit(source) => {
                debug!(fingerprint = %fingerprint, "Resolved from cache");
                self.metrics.record_cache_hit();
                return Some(source);
            }
            CacheLookup::Absent => {
                debug!(fingerprint = %fingerprint, "Cached as not found");
                self.metrics.record_cache_hit();
                return None;
            }
            CacheLookup::Miss => {}
        }

        let outcome = match self.lookup_with_backoff(media.url()).await {
            Ok(results) => results.into_iter().next(),
            Err(e) => {
                error!(error = %e, service = self.lookup.service_name(), "Lookup failed");
                None
            }
        };

        match &outcome {
            Some(source) => info!(
                index = source.index_name(),
                similarity = source.similarity(),
                "Found source"
            ),
            None => info!("No source found"),
        }

        self.cache.put(fingerprint, outcome.clone());
        outcome
    }

    async fn lookup_with_backoff(
        &self,
        url: &str,
    ) -> Result<Vec<SourceResult>, saucebot_error::LookupError> {
        let strategy = FixedInterval::new(self.config.backoff())
            .take(self.config.max_rate_limit_retries().unwrap_or(usize::MAX));

        let lookup = Arc::clone(&self.lookup);
        let metrics = self.metrics.clone();
        let url = url.to_string();
        let backoff_secs = *self.config.rate_limit_backoff_secs();

        Retry::spawn(strategy, || {
            let lookup = Arc::clone(&lookup);
            let metrics = metrics.clone();
            let url = url.clone();
            async move {
                metrics.record_remote_lookup();
                match lookup.lookup(&url).await {
                    Ok(results) => Ok(results),
                    Err(e) if e.is_rate_limited() => {
                        warn!(backoff_secs, "Short lookup limit reached, throttling");
                        metrics.record_backoff();
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => Err(RetryError::Permanent(e)),
                }
            }
        })
        .await
    }
}
