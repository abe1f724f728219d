//! SauceNAO client settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the SauceNAO client.
///
/// The API key is not part of this struct; it is read from the
/// `SAUCENAO_API_KEY` environment variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct SauceNaoConfig {
    /// Results below this similarity (percent) are discarded
    #[serde(default = "default_min_similarity")]
    min_similarity: f32,

    /// Number of results requested per search
    #[serde(default = "default_results")]
    results: u8,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

fn default_min_similarity() -> f32 {
    50.0
}

fn default_results() -> u8 {
    6
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SauceNaoConfig {
    fn default() -> Self {
        Self {
            min_similarity: default_min_similarity(),
            results: default_results(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SauceNaoConfig {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
