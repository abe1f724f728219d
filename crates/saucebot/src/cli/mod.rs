//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the saucebot binary.

mod commands;
mod lookup;
mod run;

pub use commands::{Cli, Commands};
pub use lookup::handle_lookup;
pub use run::handle_run;

use saucebot::{ConfigError, SauceResult};

/// Environment variable holding the SauceNAO API key.
pub const SAUCENAO_API_KEY: &str = "SAUCENAO_API_KEY";

/// Environment variable holding the Twitter bearer token.
pub const TWITTER_BEARER_TOKEN: &str = "TWITTER_BEARER_TOKEN";

/// Read a credential from the environment.
fn secret(name: &str) -> SauceResult<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::new(format!("{} is not set (environment or .env)", name)).into()),
    }
}
