//! Posts fetched from the social platform.

use crate::MediaItem;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Platform post identifier.
///
/// Identifiers grow monotonically with posting time, so they double as
/// stream cursors.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[display("{}", _0)]
pub struct PostId(pub u64);

impl PostId {
    /// Cursor used for a stream with no posts at all.
    pub const FLOOR: PostId = PostId(1);

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Author of a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct Author {
    /// Platform user id
    id: String,
    /// Handle without the leading `@`
    handle: String,
}

impl Author {
    /// Create an author.
    pub fn new(id: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handle: handle.into(),
        }
    }
}

/// A post as fetched from the platform. Immutable once fetched.
///
/// Media may arrive in two entity lists: the extended list (every attachment,
/// with its real type) and the basic list (first photo only). Either may be
/// absent.
///
/// # Examples
///
/// ```
/// use saucebot_core::{Author, MediaItem, MediaKind, Post, PostId};
///
/// let post = Post::new(PostId(10), Author::new("1", "alice"))
///     .with_text("@saucebot what is this?")
///     .with_reply_target(PostId(7));
///
/// assert_eq!(*post.id(), PostId(10));
/// assert_eq!(*post.reply_target(), Some(PostId(7)));
/// assert!(post.extended_media().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct Post {
    /// Post identifier
    #[setters(skip)]
    id: PostId,
    /// Who posted it
    #[setters(skip)]
    author: Author,
    /// Post text
    text: String,
    /// Post this one replies to
    reply_target: Option<PostId>,
    /// Extended media entities
    extended_media: Option<Vec<MediaItem>>,
    /// Basic media entities
    media: Option<Vec<MediaItem>>,
    /// When it was posted
    created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a text-only post with no reply target and no media.
    pub fn new(id: PostId, author: Author) -> Self {
        Self {
            id,
            author,
            text: String::new(),
            reply_target: None,
            extended_media: None,
            media: None,
            created_at: None,
        }
    }
}
