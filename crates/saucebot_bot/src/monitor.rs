//! Polling loops over the mention stream and the monitored accounts.
//!
//! Both monitors follow the same protocol. A stream starts without a cursor
//! (`Init`). Its first poll records the newest existing post as the cursor
//! and replies to nothing, so a backlog is never answered. Later polls fetch
//! everything newer than the cursor in ascending order and, for each post,
//! advance the cursor before doing anything else with it. A crash mid-post
//! therefore skips that post instead of answering it twice.

use crate::{AccountSource, BotMetrics, MediaClassifier, ReplyComposer, SauceResolver};
use saucebot_core::{Post, PostId};
use saucebot_error::{PlatformError, SauceResult};
use saucebot_interface::SocialPlatform;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Cursor state of one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorState {
    /// No cursor yet; the next poll establishes the baseline.
    #[default]
    Init,
    /// Posts up to and including this id have been taken.
    Polling(PostId),
}

impl CursorState {
    /// Current cursor, if established.
    pub fn cursor(&self) -> Option<PostId> {
        match self {
            CursorState::Init => None,
            CursorState::Polling(id) => Some(*id),
        }
    }
}

/// What happened to a single post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOutcome {
    /// A reply was published.
    Replied,
    /// Processed, but there was nothing to say.
    Silent,
    /// No usable media.
    Skipped,
    /// Processing failed; logged and moved on.
    Failed,
}

/// Tally of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollReport {
    /// Streams whose baseline was recorded this cycle
    pub baselined: usize,
    /// Streams whose fetch failed
    pub fetch_failures: usize,
    /// Posts taken
    pub fetched: usize,
    /// Replies published
    pub replied: usize,
    /// Posts without media
    pub skipped: usize,
    /// Posts whose processing failed
    pub failed: usize,
}

impl PollReport {
    fn record(&mut self, outcome: PostOutcome) {
        self.fetched += 1;
        match outcome {
            PostOutcome::Replied => self.replied += 1,
            PostOutcome::Silent => {}
            PostOutcome::Skipped => self.skipped += 1,
            PostOutcome::Failed => self.failed += 1,
        }
    }
}

/// Classify, resolve, compose and reply for one post at a time.
#[derive(Clone)]
pub struct PostPipeline {
    platform: Arc<dyn SocialPlatform>,
    classifier: MediaClassifier,
    resolver: SauceResolver,
    composer: ReplyComposer,
    metrics: BotMetrics,
}

impl std::fmt::Debug for PostPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostPipeline")
            .field("resolver", &self.resolver)
            .field("composer", &self.composer)
            .finish_non_exhaustive()
    }
}

impl PostPipeline {
    /// Assemble a pipeline.
    pub fn new(
        platform: Arc<dyn SocialPlatform>,
        resolver: SauceResolver,
        composer: ReplyComposer,
        metrics: BotMetrics,
    ) -> Self {
        Self {
            classifier: MediaClassifier::new(Arc::clone(&platform)),
            platform,
            resolver,
            composer,
            metrics,
        }
    }

    /// The platform this pipeline replies on.
    pub fn platform(&self) -> &Arc<dyn SocialPlatform> {
        &self.platform
    }

    /// Process one post to completion. Never fails; problems are logged.
    #[instrument(skip(self, post), fields(post_id = %post.id()))]
    pub async fn process(&self, stream: &str, post: &Post, requested: bool) -> PostOutcome {
        self.metrics.record_post_seen();
        match self.try_process(post, requested).await {
            Ok(true) => {
                self.metrics.record_reply();
                PostOutcome::Replied
            }
            Ok(false) => PostOutcome::Silent,
            Err(e) if matches!(e.kind(), saucebot_error::SauceErrorKind::NoMedia(_)) => {
                info!(stream, error = %e, "Skipping post");
                self.metrics.record_no_media();
                PostOutcome::Skipped
            }
            Err(e) => {
                error!(stream, post_id = %post.id(), error = %e, "Failed to process post");
                self.metrics.record_failure();
                PostOutcome::Failed
            }
        }
    }

    async fn try_process(&self, post: &Post, requested: bool) -> SauceResult<bool> {
        let media = self.classifier.classify(post).await?;
        let Some(first) = media.first() else {
            return Ok(false);
        };
        debug!(url = %first.url(), kind = %first.kind(), "Found media");

        let source = self.resolver.resolve(first).await;
        let Some(reply) = self.composer.compose(post, source.as_ref(), requested) else {
            return Ok(false);
        };

        self.platform
            .post_reply(reply.text(), post, *reply.auto_populate_metadata())
            .await?;
        info!(in_reply_to = %reply.in_reply_to(), "Reply sent");
        Ok(true)
    }
}

/// Watches the bot's own mentions and answers every one.
#[derive(Debug)]
pub struct MentionMonitor {
    pipeline: PostPipeline,
    state: CursorState,
}

impl MentionMonitor {
    /// Create a monitor in the `Init` state.
    pub fn new(pipeline: PostPipeline) -> Self {
        Self {
            pipeline,
            state: CursorState::Init,
        }
    }

    /// Current state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Record the newest existing mention as the cursor (Init → Polling).
    ///
    /// # Errors
    ///
    /// Fails if the platform cannot be reached; the monitor stays in `Init`.
    #[instrument(skip(self))]
    pub async fn establish(&mut self) -> Result<PostId, PlatformError> {
        let latest = self
            .pipeline
            .platform()
            .latest_mention_id()
            .await?
            .unwrap_or(PostId::FLOOR);
        info!(cursor = %latest, "Retrieving mentions after baseline");
        self.state = CursorState::Polling(latest);
        Ok(latest)
    }

    /// Run one cycle.
    #[instrument(skip(self))]
    pub async fn poll(&mut self) -> PollReport {
        let mut report = PollReport::default();

        let cursor = match self.state {
            CursorState::Polling(cursor) => cursor,
            CursorState::Init => {
                match self.establish().await {
                    Ok(_) => report.baselined += 1,
                    Err(e) => {
                        error!(error = %e, "Failed to establish mention cursor");
                        report.fetch_failures += 1;
                    }
                }
                return report;
            }
        };

        debug!(since = %cursor, "Retrieving mentions");
        let posts = match self.pipeline.platform().fetch_mentions_since(cursor).await {
            Ok(posts) => posts,
            Err(e) => {
                error!(error = %e, since = %cursor, "Failed to fetch mentions");
                report.fetch_failures += 1;
                return report;
            }
        };

        for post in posts {
            let cursor = self.state.cursor().unwrap_or(PostId::FLOOR).max(*post.id());
            self.state = CursorState::Polling(cursor);
            let outcome = self.pipeline.process("mentions", &post, true).await;
            report.record(outcome);
        }
        report
    }
}

/// Watches monitored accounts and answers their media posts unprompted.
pub struct AccountMonitor {
    pipeline: PostPipeline,
    source: Arc<dyn AccountSource>,
    cursors: HashMap<String, PostId>,
}

impl std::fmt::Debug for AccountMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountMonitor")
            .field("cursors", &self.cursors)
            .finish_non_exhaustive()
    }
}

impl AccountMonitor {
    /// Create a monitor with every account in `Init`.
    pub fn new(pipeline: PostPipeline, source: Arc<dyn AccountSource>) -> Self {
        Self {
            pipeline,
            source,
            cursors: HashMap::new(),
        }
    }

    /// State of one account's stream.
    pub fn state(&self, account: &str) -> CursorState {
        self.cursors
            .get(account)
            .map_or(CursorState::Init, |cursor| CursorState::Polling(*cursor))
    }

    /// Run one cycle over the current account list.
    ///
    /// Accounts that left the list lose their cursor, so adding one back
    /// starts from a fresh baseline.
    #[instrument(skip(self))]
    pub async fn poll(&mut self) -> PollReport {
        let mut report = PollReport::default();

        let accounts = self.source.accounts().await;
        self.cursors.retain(|account, _| accounts.contains(account));
        if accounts.is_empty() {
            debug!("No monitored accounts configured");
            return report;
        }

        for account in &accounts {
            let platform = Arc::clone(self.pipeline.platform());

            let Some(cursor) = self.cursors.get(account).copied() else {
                match platform.latest_user_post_id(account).await {
                    Ok(latest) => {
                        let latest = latest.unwrap_or(PostId::FLOOR);
                        info!(account = %account, cursor = %latest, "Monitoring posts after baseline");
                        self.cursors.insert(account.clone(), latest);
                        report.baselined += 1;
                    }
                    Err(e) => {
                        error!(account = %account, error = %e, "Failed to establish account cursor");
                        report.fetch_failures += 1;
                    }
                }
                continue;
            };

            debug!(account = %account, since = %cursor, "Retrieving posts");
            let posts = match platform.fetch_user_posts_since(account, cursor).await {
                Ok(posts) => posts,
                Err(e) => {
                    error!(account = %account, error = %e, "Failed to fetch posts");
                    report.fetch_failures += 1;
                    continue;
                }
            };
            info!(account = %account, count = posts.len(), "Posts found");

            for post in posts {
                let cursor = self.cursors.entry(account.clone()).or_insert(cursor);
                *cursor = (*cursor).max(*post.id());
                let outcome = self.pipeline.process(account, &post, false).await;
                report.record(outcome);
            }
        }

        report
    }
}
