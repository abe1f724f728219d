//! Source records returned by reverse image lookup.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Fields shared by every kind of source record.
///
/// # Examples
///
/// ```
/// use saucebot_core::SourceInfoBuilder;
///
/// let info = SourceInfoBuilder::default()
///     .index_id(5u32)
///     .index_name("Pixiv Images")
///     .title("Sunset")
///     .author_name("someone")
///     .source_url("https://www.pixiv.net/artworks/1")
///     .similarity(91.5f32)
///     .build()
///     .unwrap();
///
/// assert_eq!(info.index_name(), "Pixiv Images");
/// assert_eq!(info.author_name().as_deref(), Some("someone"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct SourceInfo {
    /// Numeric id of the index the match came from
    index_id: u32,
    /// Human readable index name (e.g. "Pixiv Images")
    index_name: String,
    /// Title of the matched work
    title: String,
    /// Artist or uploader, when known
    #[builder(setter(into, strip_option), default)]
    author_name: Option<String>,
    /// Canonical URL of the original
    source_url: String,
    /// Match confidence in percent
    similarity: f32,
}

/// A resolved source.
///
/// Video sources (anime, movies, shows) additionally carry the episode and
/// the timestamp within it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceResult {
    /// Illustration, photo, manga page and everything else
    Generic(SourceInfo),
    /// Frame from a video
    Video {
        /// Common fields
        info: SourceInfo,
        /// Episode number or label
        episode: Option<String>,
        /// Position within the episode (e.g. "00:12:31 / 00:23:40")
        timestamp: Option<String>,
    },
}

impl SourceResult {
    /// Common fields regardless of variant.
    pub fn info(&self) -> &SourceInfo {
        match self {
            SourceResult::Generic(info) => info,
            SourceResult::Video { info, .. } => info,
        }
    }

    /// Human readable index name.
    pub fn index_name(&self) -> &str {
        self.info().index_name()
    }

    /// Title of the matched work.
    pub fn title(&self) -> &str {
        self.info().title()
    }

    /// Author name, if known.
    pub fn author_name(&self) -> Option<&str> {
        self.info().author_name().as_deref()
    }

    /// Canonical source URL.
    pub fn source_url(&self) -> &str {
        self.info().source_url()
    }

    /// Match confidence in percent.
    pub fn similarity(&self) -> f32 {
        *self.info().similarity()
    }

    /// Whether this is a video source.
    pub fn is_video(&self) -> bool {
        matches!(self, SourceResult::Video { .. })
    }

    /// Episode, for video sources that report one.
    pub fn episode(&self) -> Option<&str> {
        match self {
            SourceResult::Video { episode, .. } => episode.as_deref(),
            SourceResult::Generic(_) => None,
        }
    }

    /// Timestamp, for video sources that report one.
    pub fn timestamp(&self) -> Option<&str> {
        match self {
            SourceResult::Video { timestamp, .. } => timestamp.as_deref(),
            SourceResult::Generic(_) => None,
        }
    }
}
