//! Media extraction from posts.

use saucebot_core::{MediaItem, Post};
use saucebot_error::{NoMediaError, NoMediaReason};
use saucebot_interface::SocialPlatform;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Decides which media a post is asking about.
///
/// A reply is about the post it replies to; anything else is about its own
/// attachments. The reply rule is applied once, so a reply to a reply is
/// judged by the direct attachments of its immediate target.
#[derive(Clone)]
pub struct MediaClassifier {
    platform: Arc<dyn SocialPlatform>,
}

impl std::fmt::Debug for MediaClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaClassifier").finish_non_exhaustive()
    }
}

impl MediaClassifier {
    /// Create a classifier that resolves reply targets through `platform`.
    pub fn new(platform: Arc<dyn SocialPlatform>) -> Self {
        Self { platform }
    }

    /// Extract the media `post` refers to.
    ///
    /// # Errors
    ///
    /// [`NoMediaError`] when there is nothing to look up, including when the
    /// reply target cannot be fetched. This is the only failure.
    #[instrument(skip(self, post), fields(post_id = %post.id()))]
    pub async fn classify(&self, post: &Post) -> Result<Vec<MediaItem>, NoMediaError> {
        let Some(target_id) = *post.reply_target() else {
            return direct_media(post);
        };

        info!(target_id = %target_id, "Looking up reply target");
        match self.platform.fetch_post(target_id).await {
            Ok(target) => direct_media(&target).map_err(|e| {
                debug!(target_id = %target_id, "Reply target has no media");
                NoMediaError::new(post.id().get(), e.reason)
            }),
            Err(e) => {
                info!(target_id = %target_id, error = %e, "Reply target no longer exists or is not visible");
                Err(NoMediaError::new(
                    post.id().get(),
                    NoMediaReason::ReplyTargetUnavailable,
                ))
            }
        }
    }
}

/// Media attached directly to `post`: extended entities first, then basic.
///
/// # Errors
///
/// [`NoMediaError`] if both lists are absent or empty.
pub fn direct_media(post: &Post) -> Result<Vec<MediaItem>, NoMediaError> {
    [post.extended_media(), post.media()]
        .into_iter()
        .flatten()
        .find(|items| !items.is_empty())
        .cloned()
        .ok_or_else(|| NoMediaError::new(post.id().get(), NoMediaReason::NoEntities))
}
