//! Twitter API v2 integration.
//!
//! Posts are fetched with the `author_id`, `attachments.media_keys` and
//! `referenced_tweets.id` expansions so a single request carries everything
//! the classifier needs: the author's handle, every attachment with its real
//! type, and the reply target.
//!
//! The bearer token must carry user context; replying is not possible with an
//! app-only token.

mod client;
mod convert;
mod dto;

pub use client::TwitterClient;
