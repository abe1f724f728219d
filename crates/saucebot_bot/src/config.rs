//! Configuration for the bot server.
//!
//! The configuration system layers several TOML sources (later sources
//! override earlier ones):
//! 1. Bundled defaults (`saucebot.toml` shipped with the crate)
//! 2. `~/.config/saucebot/saucebot.toml`
//! 3. `./saucebot.toml`
//! 4. An explicit file (the `--config` flag)
//! 5. `SAUCEBOT_*` environment variables, `__` separating sections
//!    (e.g. `SAUCEBOT_TWITTER__MONITORED_ACCOUNTS=artist_a,artist_b`)
//!
//! Credentials are not part of the configuration; they come from the
//! environment only.

use derive_getters::Getters;
use saucebot_cache::LookupCacheConfig;
use saucebot_error::{ConfigError, SauceError, SauceResult};
use saucebot_lookup::SauceNaoConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../saucebot.toml");

/// Configuration for the bot server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct BotConfig {
    /// Platform and reply settings
    #[serde(default)]
    twitter: TwitterSettings,
    /// Lookup client settings
    #[serde(default)]
    saucenao: SauceNaoConfig,
    /// Lookup cache settings
    #[serde(default)]
    cache: LookupCacheConfig,
    /// Rate limit handling
    #[serde(default)]
    resolver: ResolverConfig,
}

/// Platform and reply settings.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_", into)]
pub struct TwitterSettings {
    /// Comma separated handles to monitor; empty disables account monitoring
    #[serde(default)]
    monitored_accounts: String,
    /// Seconds between mention checks
    #[serde(default = "default_mentions_interval_secs")]
    mentions_interval_secs: u64,
    /// Seconds between monitored account checks
    #[serde(default = "default_monitored_interval_secs")]
    monitored_interval_secs: u64,
    /// Weighted length limit for replies
    #[serde(default = "default_max_reply_length")]
    max_reply_length: usize,
    /// Append the promotional note to unrequested replies
    #[serde(default = "default_promote")]
    promote: bool,
}

fn default_mentions_interval_secs() -> u64 {
    15
}

fn default_monitored_interval_secs() -> u64 {
    60
}

fn default_max_reply_length() -> usize {
    280
}

fn default_promote() -> bool {
    true
}

impl Default for TwitterSettings {
    fn default() -> Self {
        Self {
            monitored_accounts: String::new(),
            mentions_interval_secs: default_mentions_interval_secs(),
            monitored_interval_secs: default_monitored_interval_secs(),
            max_reply_length: default_max_reply_length(),
            promote: default_promote(),
        }
    }
}

impl TwitterSettings {
    /// Monitored handles: trimmed, lowercased, without `@`, duplicates removed.
    ///
    /// ```
    /// use saucebot_bot::TwitterSettings;
    ///
    /// let settings = TwitterSettings::default().with_monitored_accounts(" @Artist_A, artist_b,,artist_a ");
    /// assert_eq!(settings.accounts(), vec!["artist_a", "artist_b"]);
    /// ```
    pub fn accounts(&self) -> Vec<String> {
        let mut accounts: Vec<String> = Vec::new();
        for handle in self.monitored_accounts.split(',') {
            let handle = handle.trim().trim_start_matches('@').to_lowercase();
            if !handle.is_empty() && !accounts.contains(&handle) {
                accounts.push(handle);
            }
        }
        accounts
    }

    /// Mention polling interval.
    pub fn mentions_interval(&self) -> Duration {
        Duration::from_secs(self.mentions_interval_secs.max(1))
    }

    /// Account polling interval.
    pub fn monitored_interval(&self) -> Duration {
        Duration::from_secs(self.monitored_interval_secs.max(1))
    }
}

/// Rate limit handling for the resolver.
///
/// While the lookup service reports its short-term limit, the resolver
/// sleeps for `rate_limit_backoff_secs` and tries again. With
/// `max_rate_limit_retries` unset it keeps trying until the limit clears.
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
pub struct ResolverConfig {
    /// Seconds to wait after a rate limit response
    #[serde(default = "default_rate_limit_backoff_secs")]
    #[builder(default = "default_rate_limit_backoff_secs()")]
    rate_limit_backoff_secs: u64,
    /// Give up after this many rate limited attempts (unset: never)
    #[serde(default)]
    #[builder(default)]
    #[setters(strip_option)]
    max_rate_limit_retries: Option<usize>,
}

fn default_rate_limit_backoff_secs() -> u64 {
    30
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            rate_limit_backoff_secs: default_rate_limit_backoff_secs(),
            max_rate_limit_retries: None,
        }
    }
}

impl ResolverConfig {
    /// Backoff as a duration.
    pub fn backoff(&self) -> Duration {
        Duration::from_secs(self.rate_limit_backoff_secs)
    }
}

impl BotConfig {
    /// Load configuration from every layer, with an optional explicit file.
    ///
    /// # Errors
    ///
    /// Fails if the explicit file is missing or any source fails to parse.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use saucebot_bot::BotConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = BotConfig::load(None)?;
    /// println!("Monitoring {:?}", config.twitter().accounts());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(explicit), fields(explicit = ?explicit.map(Path::display)))]
    pub fn load(explicit: Option<&Path>) -> SauceResult<Self> {
        debug!("Loading configuration: env > explicit > current dir > home dir > bundled defaults");

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/saucebot/saucebot.toml");
            builder = builder.add_source(config::File::from(home_config).required(false));
        }

        builder = builder.add_source(config::File::with_name("saucebot").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("SAUCEBOT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Load configuration from a single TOML file, without the other layers.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> SauceResult<Self> {
        debug!("Loading configuration from file");
        let builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_ref()));
        Self::finish(builder)
    }

    /// Parse configuration from TOML text layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Fails if the text does not parse.
    pub fn from_toml_str(toml: &str) -> SauceResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> SauceResult<Self> {
        builder
            .build()
            .map_err(|e| {
                SauceError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                SauceError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
