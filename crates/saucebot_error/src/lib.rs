//! Error types for SauceBot.
//!
//! This crate provides the foundation error types used throughout the SauceBot workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use saucebot_error::{SauceResult, ConfigError};
//!
//! fn load_accounts() -> SauceResult<String> {
//!     Err(ConfigError::new("monitored_accounts is not a string"))?
//! }
//!
//! match load_accounts() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod lookup;
mod media;
mod platform;

pub use config::ConfigError;
pub use error::{SauceError, SauceErrorKind, SauceResult};
pub use json::JsonError;
pub use lookup::{LookupError, LookupErrorKind};
pub use media::{NoMediaError, NoMediaReason};
pub use platform::{PlatformError, PlatformErrorKind};
