//! Where the monitored account list comes from.

use crate::BotConfig;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::PathBuf;
use tracing::{debug, error, warn};

/// Supplies the monitored account handles.
///
/// Called at the start of every account check cycle, so implementations can
/// pick up changes while the bot runs. An empty list disables monitoring.
#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Current handles, normalized (lowercase, no `@`).
    async fn accounts(&self) -> Vec<String>;
}

/// A fixed account list.
#[derive(Debug, Clone, Default)]
pub struct StaticAccounts(Vec<String>);

impl StaticAccounts {
    /// Create a fixed list.
    pub fn new<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(accounts.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl AccountSource for StaticAccounts {
    async fn accounts(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Re-reads `twitter.monitored_accounts` from the configuration layers on
/// every call. If loading fails the last good list is returned.
///
/// Loading reads files, so it runs on the blocking thread pool.
#[derive(Debug)]
pub struct ConfigAccountSource {
    explicit: Option<PathBuf>,
    last_good: Mutex<Vec<String>>,
}

impl ConfigAccountSource {
    /// Watch the standard layers plus an optional explicit file.
    pub fn new(explicit: Option<PathBuf>, initial: Vec<String>) -> Self {
        Self {
            explicit,
            last_good: Mutex::new(initial),
        }
    }
}

#[async_trait]
impl AccountSource for ConfigAccountSource {
    async fn accounts(&self) -> Vec<String> {
        let explicit = self.explicit.clone();
        let loaded =
            tokio::task::spawn_blocking(move || BotConfig::load(explicit.as_deref())).await;

        match loaded {
            Ok(Ok(config)) => {
                let accounts = config.twitter().accounts();
                let mut last_good = self.last_good.lock();
                if *last_good != accounts {
                    debug!(?accounts, "Monitored account list changed");
                    *last_good = accounts.clone();
                }
                accounts
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to reload monitored accounts, keeping previous list");
                self.last_good.lock().clone()
            }
            Err(e) => {
                error!(error = %e, "Account reload task failed, keeping previous list");
                self.last_good.lock().clone()
            }
        }
    }
}
