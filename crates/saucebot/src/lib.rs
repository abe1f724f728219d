//! SauceBot - source lookup for images posted on Twitter
//!
//! SauceBot watches its own mentions and a list of monitored accounts. For
//! every new post with an image it asks SauceNAO where the image came from
//! and replies with the title, author and a link to the original.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use saucebot::{BotConfig, BotServer, ConfigAccountSource, SauceNaoClient, TwitterClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BotConfig::load(None)?;
//!     let twitter = TwitterClient::new(std::env::var("TWITTER_BEARER_TOKEN")?)?;
//!     let saucenao = SauceNaoClient::new(std::env::var("SAUCENAO_API_KEY")?, config.saucenao().clone())?;
//!     let accounts = ConfigAccountSource::new(None, config.twitter().accounts());
//!
//!     BotServer::new(config, Arc::new(twitter), Arc::new(saucenao), Arc::new(accounts))
//!         .start()
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `saucebot_core` - Posts, media and source results
//! - `saucebot_interface` - `SocialPlatform` and `SauceLookup` traits
//! - `saucebot_error` - Error types
//! - `saucebot_cache` - Lookup cache keyed by media fingerprint
//! - `saucebot_lookup` - SauceNAO client
//! - `saucebot_social` - Twitter client
//! - `saucebot_bot` - Monitors, resolver, composer and server
//!
//! This crate re-exports everything for convenience.

pub use saucebot_bot::*;
pub use saucebot_cache::*;
pub use saucebot_core::*;
pub use saucebot_error::*;
pub use saucebot_interface::*;
pub use saucebot_lookup::*;
pub use saucebot_social::*;
