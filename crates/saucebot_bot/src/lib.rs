//! Polling loops, source resolution and reply composition for SauceBot.
//!
//! Data flows one post at a time:
//! - **MediaClassifier** finds the media a post refers to
//! - **SauceResolver** finds its source (cache first, then the lookup service)
//! - **ReplyComposer** turns the source into reply text
//!
//! **MentionMonitor** and **AccountMonitor** feed posts through that pipeline,
//! and **BotServer** runs both on timers alongside a cache sweeper.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod accounts;
mod classifier;
mod composer;
mod config;
mod metrics;
mod monitor;
mod resolver;
mod server;

pub use accounts::{AccountSource, ConfigAccountSource, StaticAccounts};
pub use classifier::{MediaClassifier, direct_media};
pub use composer::{ELLIPSIS, PREVIEW_CHARS, Reply, ReplyComposer, URL_WEIGHT, preview, weighted_length};
pub use config::{BotConfig, ResolverConfig, ResolverConfigBuilder, TwitterSettings};
pub use metrics::{BotMetrics, MetricsSnapshot};
pub use monitor::{AccountMonitor, CursorState, MentionMonitor, PollReport, PostOutcome, PostPipeline};
pub use resolver::SauceResolver;
pub use server::BotServer;
