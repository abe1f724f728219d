//! Reverse image lookup clients for SauceBot.
//!
//! Each service lives in its own submodule and implements
//! [`saucebot_interface::SauceLookup`]:
//! - `saucenao` - SauceNAO search API

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod saucenao;

pub use saucenao::{SauceNaoClient, SauceNaoConfig};
