//! SauceNAO search API integration.
//!
//! SauceNAO enforces two quotas: a short one (a handful of searches per
//! 30 seconds) and a daily one. Only the short quota is reported as
//! retriable.

mod client;
mod config;
mod convert;
mod dto;

pub use client::SauceNaoClient;
pub use config::SauceNaoConfig;
