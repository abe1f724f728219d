//! Conversion from Twitter wire types to the SauceBot data model.

use super::dto::{Includes, MediaDto, TweetDto};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use saucebot_core::{Author, MediaItem, MediaKind, Post, PostId};
use saucebot_error::{PlatformError, PlatformErrorKind};

/// What a request was about, for mapping 404s.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Target<'a> {
    Post(PostId),
    Account(&'a str),
    Timeline,
}

/// Map a non-success HTTP status to an error kind.
pub(crate) fn status_error(status: StatusCode, body: &str, target: Target<'_>) -> PlatformErrorKind {
    match status {
        StatusCode::NOT_FOUND => match target {
            Target::Post(id) => PlatformErrorKind::NotFound(id.get()),
            Target::Account(handle) => PlatformErrorKind::UnknownAccount(handle.to_string()),
            Target::Timeline => api_error(status, body),
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            PlatformErrorKind::Unauthorized(body.chars().take(200).collect())
        }
        StatusCode::TOO_MANY_REQUESTS => PlatformErrorKind::RateLimited,
        _ => api_error(status, body),
    }
}

fn api_error(status: StatusCode, body: &str) -> PlatformErrorKind {
    PlatformErrorKind::Api {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    }
}

/// Parse a string snowflake.
pub(crate) fn parse_id(raw: &str) -> Result<PostId, PlatformError> {
    raw.parse::<u64>().map(PostId).map_err(|e| {
        PlatformError::new(PlatformErrorKind::Parse(format!(
            "Invalid tweet id {:?}: {}",
            raw, e
        )))
    })
}

/// Build a [`Post`] from a tweet and the expansions sent alongside it.
pub(crate) fn to_post(tweet: &TweetDto, includes: &Includes) -> Result<Post, PlatformError> {
    let id = parse_id(&tweet.id)?;

    let author_id = tweet.author_id.clone().unwrap_or_default();
    let handle = includes
        .users
        .iter()
        .find(|user| user.id == author_id)
        .map(|user| user.username.clone())
        .unwrap_or_else(|| author_id.clone());

    let mut post = Post::new(id, Author::new(author_id, handle)).with_text(tweet.text.clone());

    if let Some(target) = tweet
        .referenced_tweets
        .iter()
        .find(|reference| reference.kind == "replied_to")
    {
        post = post.with_reply_target(parse_id(&target.id)?);
    }

    let extended: Vec<MediaItem> = tweet
        .attachments
        .as_ref()
        .map(|attachments| {
            attachments
                .media_keys
                .iter()
                .filter_map(|key| find_media(includes, key))
                .filter_map(to_media_item)
                .collect()
        })
        .unwrap_or_default();
    if !extended.is_empty() {
        post = post.with_extended_media(extended);
    }

    // Basic entities expose the first photo only
    let basic = tweet.entities.as_ref().and_then(|entities| {
        entities
            .urls
            .iter()
            .filter_map(|url| url.media_key.as_deref())
            .filter_map(|key| find_media(includes, key))
            .filter(|media| media.kind == "photo")
            .find_map(to_media_item)
    });
    if let Some(photo) = basic {
        post = post.with_media(vec![photo]);
    }

    if let Some(created_at) = tweet
        .created_at
        .as_deref()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
    {
        post = post.with_created_at(created_at.with_timezone(&Utc));
    }

    Ok(post)
}

fn find_media<'a>(includes: &'a Includes, key: &str) -> Option<&'a MediaDto> {
    includes.media.iter().find(|media| media.media_key == key)
}

/// Photos resolve to their own URL, videos and GIFs to their thumbnail.
fn to_media_item(media: &MediaDto) -> Option<MediaItem> {
    let kind = MediaKind::from_label(&media.kind);
    let url = match kind {
        MediaKind::Photo => media.url.as_deref(),
        MediaKind::Video | MediaKind::AnimatedGif => media.preview_image_url.as_deref(),
    }?;
    Some(MediaItem::new(url, kind))
}
