//! Media attached to posts.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What kind of media an attachment is.
///
/// Video and animated GIF attachments are looked up through their preview
/// thumbnail, so every kind resolves to a still image URL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Still image
    #[display("photo")]
    Photo,
    /// Video (thumbnail URL)
    #[display("video")]
    Video,
    /// Animated GIF (thumbnail URL)
    #[display("animated_gif")]
    AnimatedGif,
}

impl MediaKind {
    /// Parse the platform's media type label. Unknown labels are treated as photos.
    pub fn from_label(label: &str) -> Self {
        match label {
            "video" => MediaKind::Video,
            "animated_gif" => MediaKind::AnimatedGif,
            _ => MediaKind::Photo,
        }
    }
}

/// A single media attachment.
///
/// # Examples
///
/// ```
/// use saucebot_core::{MediaItem, MediaKind};
///
/// let item = MediaItem::new("https://pbs.twimg.com/media/abc.jpg", MediaKind::Photo);
/// assert_eq!(item.url(), "https://pbs.twimg.com/media/abc.jpg");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct MediaItem {
    /// Canonical content URL (thumbnail for videos)
    url: String,
    /// Attachment kind
    kind: MediaKind,
}

impl MediaItem {
    /// Create a media item.
    pub fn new(url: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }
}
