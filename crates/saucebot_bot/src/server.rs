//! Bot server that runs both monitors and the cache sweeper.
//!
//! Each loop is its own tokio task on a fixed interval. A watch channel
//! stops all of them once the shutdown future completes.

use crate::{
    AccountMonitor, AccountSource, BotConfig, BotMetrics, MentionMonitor, PostPipeline,
    ReplyComposer, SauceResolver,
};
use saucebot_cache::LookupCache;
use saucebot_error::SauceResult;
use saucebot_interface::{SauceLookup, SocialPlatform};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval, interval_at};
use tracing::{debug, error, info, instrument, warn};

/// Bot server that runs both monitors and the cache sweeper.
pub struct BotServer {
    config: BotConfig,
    platform: Arc<dyn SocialPlatform>,
    lookup: Arc<dyn SauceLookup>,
    accounts: Arc<dyn AccountSource>,
    cache: Arc<LookupCache>,
    metrics: BotMetrics,
}

impl BotServer {
    /// Creates a new bot server.
    pub fn new(
        config: BotConfig,
        platform: Arc<dyn SocialPlatform>,
        lookup: Arc<dyn SauceLookup>,
        accounts: Arc<dyn AccountSource>,
    ) -> Self {
        let cache = Arc::new(LookupCache::new(config.cache().clone()));
        Self {
            config,
            platform,
            lookup,
            accounts,
            cache,
            metrics: BotMetrics::new(),
        }
    }

    /// Shared metrics.
    pub fn metrics(&self) -> &BotMetrics {
        &self.metrics
    }

    /// Shared lookup cache.
    pub fn cache(&self) -> &Arc<LookupCache> {
        &self.cache
    }

    /// A resolver over the shared cache.
    pub fn resolver(&self) -> SauceResolver {
        SauceResolver::new(
            Arc::clone(&self.lookup),
            Arc::clone(&self.cache),
            self.config.resolver().clone(),
            self.metrics.clone(),
        )
    }

    /// A composer with the configured limits.
    pub fn composer(&self) -> ReplyComposer {
        ReplyComposer::new(
            *self.config.twitter().max_reply_length(),
            *self.config.twitter().promote(),
        )
    }

    fn pipeline(&self) -> PostPipeline {
        PostPipeline::new(
            Arc::clone(&self.platform),
            self.resolver(),
            self.composer(),
            self.metrics.clone(),
        )
    }

    /// Starts the bot server and runs until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Currently infallible once started; per-post and per-cycle failures are
    /// logged and never stop the loops.
    pub async fn start(self) -> SauceResult<()> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl-C, running until killed");
                std::future::pending::<()>().await;
            }
            info!("Shutdown requested");
        })
        .await
    }

    /// Runs until `shutdown` completes. Cycles in progress finish first.
    #[instrument(skip_all)]
    pub async fn run_until<F>(self, shutdown: F) -> SauceResult<()>
    where
        F: Future<Output = ()> + Send,
    {
        info!("Starting bot server");

        let mut mentions = MentionMonitor::new(self.pipeline());
        if let Err(e) = mentions.establish().await {
            warn!(error = %e, "Could not establish mention cursor yet, will retry on first cycle");
        }
        let accounts = AccountMonitor::new(self.pipeline(), Arc::clone(&self.accounts));

        let (stop_tx, stop_rx) = watch::channel(false);
        let twitter = self.config.twitter();
        let handles = vec![
            Self::spawn_mentions_loop(mentions, twitter.mentions_interval(), stop_rx.clone()),
            Self::spawn_accounts_loop(accounts, twitter.monitored_interval(), stop_rx.clone()),
            Self::spawn_sweep_loop(
                Arc::clone(&self.cache),
                self.metrics.clone(),
                self.cache.config().sweep_interval(),
                stop_rx,
            ),
        ];

        shutdown.await;
        if stop_tx.send(true).is_err() {
            debug!("All loops already stopped");
        }
        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Bot loop ended abnormally");
            }
        }

        info!(metrics = ?self.metrics.snapshot(), "Bot server stopped");
        Ok(())
    }

    fn spawn_mentions_loop(
        mut monitor: MentionMonitor,
        period: Duration,
        mut stop: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let report = monitor.poll().await;
                        debug!(?report, "Mention cycle complete");
                    }
                    _ = stop.changed() => break,
                }
            }
            info!("Mention loop stopped");
        })
    }

    fn spawn_accounts_loop(
        mut monitor: AccountMonitor,
        period: Duration,
        mut stop: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let report = monitor.poll().await;
                        debug!(?report, "Account cycle complete");
                    }
                    _ = stop.changed() => break,
                }
            }
            info!("Account loop stopped");
        })
    }

    fn spawn_sweep_loop(
        cache: Arc<LookupCache>,
        metrics: BotMetrics,
        period: Duration,
        mut stop: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let removed = cache.purge_expired();
                        let snapshot = metrics.snapshot();
                        match serde_json::to_string(&snapshot) {
                            Ok(json) => info!(removed, cached = cache.len(), metrics = %json, "Sweep complete"),
                            Err(e) => warn!(error = %e, "Failed to serialize metrics"),
                        }
                    }
                    _ = stop.changed() => break,
                }
            }
            info!("Sweep loop stopped");
        })
    }
}
