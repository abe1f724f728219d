//! Wire types for the Twitter API v2.

use serde::{Deserialize, Serialize};

/// Envelope for endpoints returning a list of tweets.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TweetPage {
    #[serde(default)]
    pub(crate) data: Vec<TweetDto>,
    #[serde(default)]
    pub(crate) includes: Includes,
    #[serde(default)]
    pub(crate) meta: PageMeta,
}

/// Envelope for `GET /2/tweets/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SingleTweet {
    #[serde(default)]
    pub(crate) data: Option<TweetDto>,
    #[serde(default)]
    pub(crate) includes: Includes,
    /// Present (with HTTP 200) when the tweet is deleted or protected
    #[serde(default)]
    pub(crate) errors: Vec<ApiProblem>,
}

/// Envelope for user lookups.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SingleUser {
    #[serde(default)]
    pub(crate) data: Option<UserDto>,
    #[serde(default)]
    pub(crate) errors: Vec<ApiProblem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TweetDto {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) text: String,
    #[serde(default)]
    pub(crate) author_id: Option<String>,
    #[serde(default)]
    pub(crate) created_at: Option<String>,
    #[serde(default)]
    pub(crate) attachments: Option<Attachments>,
    #[serde(default)]
    pub(crate) referenced_tweets: Vec<ReferencedTweet>,
    #[serde(default)]
    pub(crate) entities: Option<Entities>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Attachments {
    #[serde(default)]
    pub(crate) media_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReferencedTweet {
    /// `replied_to`, `quoted` or `retweeted`
    #[serde(rename = "type")]
    pub(crate) kind: String,
    pub(crate) id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Entities {
    #[serde(default)]
    pub(crate) urls: Vec<UrlEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UrlEntity {
    /// Set when the link points at attached media
    #[serde(default)]
    pub(crate) media_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Includes {
    #[serde(default)]
    pub(crate) media: Vec<MediaDto>,
    #[serde(default)]
    pub(crate) users: Vec<UserDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MediaDto {
    pub(crate) media_key: String,
    /// `photo`, `video` or `animated_gif`
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) url: Option<String>,
    #[serde(default)]
    pub(crate) preview_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserDto {
    pub(crate) id: String,
    pub(crate) username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PageMeta {
    #[serde(default)]
    pub(crate) newest_id: Option<String>,
    #[serde(default)]
    pub(crate) next_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiProblem {
    #[serde(default)]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) detail: Option<String>,
}

impl ApiProblem {
    pub(crate) fn describe(&self) -> String {
        match (&self.title, &self.detail) {
            (_, Some(detail)) => detail.clone(),
            (Some(title), None) => title.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

/// Body for `POST /2/tweets`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateTweet<'a> {
    pub(crate) text: &'a str,
    pub(crate) reply: ReplySettings,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReplySettings {
    pub(crate) in_reply_to_tweet_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) exclude_reply_user_ids: Vec<String>,
}
