//! Social platform integrations for SauceBot.
//!
//! Each platform lives in its own submodule and implements
//! [`saucebot_interface::SocialPlatform`]:
//! - `twitter` - Twitter API v2

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod twitter;

pub use twitter::TwitterClient;
