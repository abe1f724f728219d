//! Collaborator traits.

use async_trait::async_trait;
use saucebot_core::{Post, PostId, SourceResult};
use saucebot_error::{LookupError, PlatformError};

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Result type for lookup operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Social platform the bot reads posts from and replies on.
///
/// Post lists are returned in ascending id order.
#[async_trait]
pub trait SocialPlatform: Send + Sync {
    /// Id of the most recent post mentioning the bot, if any.
    async fn latest_mention_id(&self) -> PlatformResult<Option<PostId>>;

    /// Id of the most recent post by `account`, if any.
    async fn latest_user_post_id(&self, account: &str) -> PlatformResult<Option<PostId>>;

    /// All mentions of the bot with an id greater than `since`.
    async fn fetch_mentions_since(&self, since: PostId) -> PlatformResult<Vec<Post>>;

    /// All posts by `account` with an id greater than `since`.
    async fn fetch_user_posts_since(&self, account: &str, since: PostId)
    -> PlatformResult<Vec<Post>>;

    /// Fetch a single post.
    ///
    /// # Errors
    ///
    /// Fails with [`saucebot_error::PlatformErrorKind::NotFound`] when the post
    /// was deleted or is not visible to the bot.
    async fn fetch_post(&self, id: PostId) -> PlatformResult<Post>;

    /// Publish `text` as a reply to `in_reply_to`.
    ///
    /// When `auto_populate_metadata` is set the platform fills in the mention
    /// context of the thread; otherwise the text is expected to carry its own
    /// `@handle`. Callers make a single attempt.
    async fn post_reply(
        &self,
        text: &str,
        in_reply_to: &Post,
        auto_populate_metadata: bool,
    ) -> PlatformResult<()>;
}

/// Reverse image lookup service.
#[async_trait]
pub trait SauceLookup: Send + Sync {
    /// Look up the source of the image at `media_url`.
    ///
    /// Returns matches ranked best first; an empty list means nothing matched.
    ///
    /// # Errors
    ///
    /// [`saucebot_error::LookupErrorKind::RateLimited`] is retriable after a
    /// backoff. Every other kind is final.
    async fn lookup(&self, media_url: &str) -> LookupResult<Vec<SourceResult>>;

    /// Service name for logging (e.g. "saucenao").
    fn service_name(&self) -> &'static str;
}
