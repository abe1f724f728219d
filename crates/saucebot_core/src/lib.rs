//! Core data types for SauceBot.
//!
//! This crate provides the data model shared by the collaborator clients and
//! the bot loops: posts fetched from the social platform, the media attached
//! to them, and the source records returned by reverse image lookup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod media;
mod post;
mod source;

pub use media::{MediaItem, MediaKind};
pub use post::{Author, Post, PostId};
pub use source::{SourceInfo, SourceInfoBuilder, SourceInfoBuilderError, SourceResult};
