//! Twitter API v2 HTTP client.

use super::convert::{Target, parse_id, status_error, to_post};
use super::dto::{CreateTweet, ReplySettings, SingleTweet, SingleUser, TweetPage};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use saucebot_core::{Post, PostId};
use saucebot_error::{PlatformError, PlatformErrorKind};
use saucebot_interface::{PlatformResult, SocialPlatform};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const TWITTER_API_URL: &str = "https://api.twitter.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const EXPANSIONS: &str = "author_id,attachments.media_keys,referenced_tweets.id";
const MEDIA_FIELDS: &str = "url,type,preview_image_url";
const TWEET_FIELDS: &str = "created_at,entities,referenced_tweets,attachments,author_id";
const USER_FIELDS: &str = "username";

/// Largest page the timeline endpoints accept.
const PAGE_SIZE: u32 = 100;
/// Smallest page the timeline endpoints accept.
const PROBE_SIZE: u32 = 5;
/// Upper bound on pages followed per fetch.
const MAX_PAGES: usize = 8;

#[derive(Debug, Clone, Copy)]
enum Timeline {
    Mentions,
    Tweets,
}

impl Timeline {
    fn path(self, user_id: &str) -> String {
        match self {
            Timeline::Mentions => format!("/2/users/{}/mentions", user_id),
            Timeline::Tweets => format!("/2/users/{}/tweets", user_id),
        }
    }
}

/// Twitter API v2 client.
///
/// The bot's own user id and every resolved handle are looked up once and
/// cached for the lifetime of the client.
///
/// # Example
///
/// ```no_run
/// use saucebot_interface::SocialPlatform;
/// use saucebot_social::TwitterClient;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TwitterClient::new(std::env::var("TWITTER_BEARER_TOKEN")?)?;
/// let latest = client.latest_mention_id().await?;
/// println!("Latest mention: {:?}", latest);
/// # Ok(())
/// # }
/// ```
pub struct TwitterClient {
    client: Client,
    bearer_token: String,
    base_url: String,
    own_id: Mutex<Option<String>>,
    user_ids: Mutex<HashMap<String, String>>,
}

impl std::fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterClient")
            .field("base_url", &self.base_url)
            .field("own_id", &*self.own_id.lock())
            .finish_non_exhaustive()
    }
}

impl TwitterClient {
    /// Creates a new Twitter client.
    ///
    /// # Errors
    ///
    /// Fails with [`PlatformErrorKind::Unauthorized`] for an empty token.
    pub fn new(bearer_token: impl Into<String>) -> PlatformResult<Self> {
        let bearer_token = bearer_token.into();
        if bearer_token.trim().is_empty() {
            return Err(PlatformError::new(PlatformErrorKind::Unauthorized(
                "Bearer token is empty".to_string(),
            )));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PlatformError::new(PlatformErrorKind::Http(e.to_string())))?;

        debug!("Creating new Twitter client");
        Ok(Self {
            client,
            bearer_token,
            base_url: TWITTER_API_URL.to_string(),
            own_id: Mutex::new(None),
            user_ids: Mutex::new(HashMap::new()),
        })
    }

    /// Point the client at a different API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        target: Target<'_>,
    ) -> PlatformResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, path, "Failed to send request to Twitter");
                PlatformError::new(PlatformErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlatformError::new(PlatformErrorKind::Http(e.to_string())))?;

        if !status.is_success() {
            let kind = status_error(status, &body, target);
            if matches!(kind, PlatformErrorKind::RateLimited) {
                warn!(path, "Twitter rate limit hit");
            }
            return Err(PlatformError::new(kind));
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, path, "Failed to parse Twitter response");
            PlatformError::new(PlatformErrorKind::Parse(e.to_string()))
        })
    }

    /// The bot's own user id.
    async fn own_id(&self) -> PlatformResult<String> {
        let cached = self.own_id.lock().clone();
        if let Some(id) = cached {
            return Ok(id);
        }

        let user: SingleUser = self.get_json("/2/users/me", &[], Target::Timeline).await?;
        let id = user
            .data
            .map(|user| user.id)
            .ok_or_else(|| {
                let detail = user
                    .errors
                    .first()
                    .map(|p| p.describe())
                    .unwrap_or_else(|| "no user in response".to_string());
                PlatformError::new(PlatformErrorKind::Unauthorized(detail))
            })?;

        info!(user_id = %id, "Resolved bot account");
        *self.own_id.lock() = Some(id.clone());
        Ok(id)
    }

    /// Resolve a handle (with or without `@`) to a user id.
    #[instrument(skip(self))]
    async fn user_id(&self, account: &str) -> PlatformResult<String> {
        let handle = account.trim().trim_start_matches('@').to_lowercase();
        let cached = self.user_ids.lock().get(&handle).cloned();
        if let Some(id) = cached {
            return Ok(id);
        }

        let path = format!("/2/users/by/username/{}", handle);
        let user: SingleUser = self
            .get_json(&path, &[], Target::Account(&handle))
            .await?;
        let Some(found) = user.data else {
            return Err(PlatformError::new(PlatformErrorKind::UnknownAccount(handle)));
        };

        debug!(user_id = %found.id, "Resolved account handle");
        self.user_ids.lock().insert(handle, found.id.clone());
        Ok(found.id)
    }

    fn timeline_query(size: u32, since: Option<PostId>, token: Option<&str>) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("max_results", size.to_string()),
            ("expansions", EXPANSIONS.to_string()),
            ("media.fields", MEDIA_FIELDS.to_string()),
            ("tweet.fields", TWEET_FIELDS.to_string()),
            ("user.fields", USER_FIELDS.to_string()),
        ];
        // A since_id of 1 or less is rejected by the API
        if let Some(since) = since.filter(|id| *id > PostId::FLOOR) {
            query.push(("since_id", since.to_string()));
        }
        if let Some(token) = token {
            query.push(("pagination_token", token.to_string()));
        }
        query
    }

    /// Every post in `timeline` newer than `since`, oldest first.
    async fn fetch_since(&self, timeline: Timeline, user_id: &str, since: PostId) -> PlatformResult<Vec<Post>> {
        let path = timeline.path(user_id);
        let mut posts = Vec::new();
        let mut token: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let query = Self::timeline_query(PAGE_SIZE, Some(since), token.as_deref());
            let page: TweetPage = self.get_json(&path, &query, Target::Timeline).await?;
            for tweet in &page.data {
                posts.push(to_post(tweet, &page.includes)?);
            }
            token = page.meta.next_token;
            if token.is_none() {
                break;
            }
        }
        if token.is_some() {
            warn!(?timeline, "Stopped following pages; older posts skipped");
        }

        posts.retain(|post| *post.id() > since);
        posts.sort_by_key(|post| *post.id());
        posts.dedup_by_key(|post| *post.id());
        debug!(?timeline, count = posts.len(), "Fetched posts");
        Ok(posts)
    }

    /// Id of the newest post in `timeline`.
    async fn latest_id(&self, timeline: Timeline, user_id: &str) -> PlatformResult<Option<PostId>> {
        let query = Self::timeline_query(PROBE_SIZE, None, None);
        let page: TweetPage = self
            .get_json(&timeline.path(user_id), &query, Target::Timeline)
            .await?;

        if let Some(newest) = page.meta.newest_id.as_deref() {
            return parse_id(newest).map(Some);
        }
        let mut newest = None;
        for tweet in &page.data {
            newest = newest.max(Some(parse_id(&tweet.id)?));
        }
        Ok(newest)
    }
}

#[async_trait]
impl SocialPlatform for TwitterClient {
    #[instrument(skip(self))]
    async fn latest_mention_id(&self) -> PlatformResult<Option<PostId>> {
        let own_id = self.own_id().await?;
        self.latest_id(Timeline::Mentions, &own_id).await
    }

    #[instrument(skip(self))]
    async fn latest_user_post_id(&self, account: &str) -> PlatformResult<Option<PostId>> {
        let user_id = self.user_id(account).await?;
        self.latest_id(Timeline::Tweets, &user_id).await
    }

    #[instrument(skip(self, since), fields(since = %since))]
    async fn fetch_mentions_since(&self, since: PostId) -> PlatformResult<Vec<Post>> {
        let own_id = self.own_id().await?;
        self.fetch_since(Timeline::Mentions, &own_id, since).await
    }

    #[instrument(skip(self, since), fields(since = %since))]
    async fn fetch_user_posts_since(&self, account: &str, since: PostId) -> PlatformResult<Vec<Post>> {
        let user_id = self.user_id(account).await?;
        self.fetch_since(Timeline::Tweets, &user_id, since).await
    }

    #[instrument(skip(self, id), fields(post_id = %id))]
    async fn fetch_post(&self, id: PostId) -> PlatformResult<Post> {
        let query = [
            ("expansions", EXPANSIONS.to_string()),
            ("media.fields", MEDIA_FIELDS.to_string()),
            ("tweet.fields", TWEET_FIELDS.to_string()),
            ("user.fields", USER_FIELDS.to_string()),
        ];
        let path = format!("/2/tweets/{}", id);
        let single: SingleTweet = self.get_json(&path, &query, Target::Post(id)).await?;

        match single.data {
            Some(tweet) => to_post(&tweet, &single.includes),
            None => {
                let detail = single.errors.first().map(|p| p.describe()).unwrap_or_default();
                debug!(detail = %detail, "Tweet not visible");
                Err(PlatformError::new(PlatformErrorKind::NotFound(id.get())))
            }
        }
    }

    #[instrument(skip(self, text, in_reply_to), fields(post_id = %in_reply_to.id()))]
    async fn post_reply(
        &self,
        text: &str,
        in_reply_to: &Post,
        auto_populate_metadata: bool,
    ) -> PlatformResult<()> {
        let exclude_reply_user_ids = if auto_populate_metadata {
            Vec::new()
        } else {
            vec![in_reply_to.author().id().clone()]
        };
        let body = CreateTweet {
            text,
            reply: ReplySettings {
                in_reply_to_tweet_id: in_reply_to.id().to_string(),
                exclude_reply_user_ids,
            },
        };

        let response = self
            .client
            .post(format!("{}/2/tweets", self.base_url))
            .bearer_auth(&self.bearer_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send reply to Twitter");
                PlatformError::new(PlatformErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Twitter rejected reply");
            return Err(PlatformError::new(status_error(
                status,
                &body,
                Target::Post(*in_reply_to.id()),
            )));
        }

        debug!(length = text.chars().count(), "Reply posted");
        Ok(())
    }
}
