//! Trait definitions for SauceBot's external collaborators.
//!
//! The bot loops never talk to a network service directly. They receive a
//! [`SocialPlatform`] and a [`SauceLookup`] at construction time and drive
//! everything through these traits.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{LookupResult, PlatformResult, SauceLookup, SocialPlatform};
