//! Reply text composition.

use derive_getters::Getters;
use saucebot_core::{Post, PostId, SourceResult};
use tracing::{debug, warn};

/// Title and author previews are cut to this many characters.
pub const PREVIEW_CHARS: usize = 32;

/// Marker appended to a cut preview.
pub const ELLIPSIS: char = '…';

/// Weight of any URL, the platform's shortened link length.
pub const URL_WEIGHT: usize = 23;

/// Code point ranges that weigh 1. Everything else (CJK, emoji, `…`) weighs 2.
const LIGHT_RANGES: [(u32, u32); 4] = [
    (0x0000, 0x10FF),
    (0x2000, 0x200D),
    (0x2010, 0x201F),
    (0x2032, 0x2037),
];

const PROMO_NOTE: &str = "I can help you look up the sauce to images elsewhere too! \
Just mention me in a reply to an image you want to look up.";

/// A reply ready to publish.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Reply {
    /// Body text
    text: String,
    /// Post being replied to
    in_reply_to: PostId,
    /// Let the platform fill in the thread's mention context
    auto_populate_metadata: bool,
}

/// Builds reply text from a resolved source.
///
/// # Example
///
/// ```
/// use saucebot_bot::ReplyComposer;
/// use saucebot_core::{Author, Post, PostId};
///
/// let composer = ReplyComposer::new(280, true);
/// let post = Post::new(PostId(3), Author::new("9", "alice"));
///
/// let apology = composer.compose(&post, None, true).expect("Requested lookups always get an answer");
/// assert!(apology.text().starts_with("@alice"));
///
/// assert!(composer.compose(&post, None, false).is_none());
/// ```
#[derive(Debug, Clone, Getters)]
pub struct ReplyComposer {
    max_reply_length: usize,
    promote: bool,
}

/// Optional lines of a source reply, in the order they are dropped when the
/// reply is too long.
#[derive(Debug, Clone)]
struct Draft<'a> {
    header: String,
    title: &'a str,
    title_chars: usize,
    author: Option<String>,
    episode: Option<&'a str>,
    timestamp: Option<&'a str>,
    url: &'a str,
    promo: bool,
}

impl Draft<'_> {
    fn render(&self) -> String {
        let mut text = format!(
            "{}\n\nTitle: {}",
            self.header,
            preview(self.title, self.title_chars)
        );
        if let Some(author) = &self.author {
            text.push_str(&format!("\nAuthor: {}", author));
        }
        if let Some(episode) = self.episode {
            text.push_str(&format!("\nEpisode: {}", episode));
        }
        if let Some(timestamp) = self.timestamp {
            text.push_str(&format!("\nTimestamp: {}", timestamp));
        }
        text.push('\n');
        text.push_str(self.url);
        if self.promo {
            text.push_str("\n\n");
            text.push_str(PROMO_NOTE);
        }
        text
    }

    /// Drop the next optional line. Returns false when nothing is left.
    fn drop_next(&mut self) -> bool {
        if self.promo {
            self.promo = false;
        } else if self.timestamp.is_some() {
            self.timestamp = None;
        } else if self.episode.is_some() {
            self.episode = None;
        } else if self.author.is_some() {
            self.author = None;
        } else {
            let shown = self.title_chars.min(self.title.chars().count());
            if shown == 0 {
                return false;
            }
            self.title_chars = shown - 1;
        }
        true
    }
}

impl ReplyComposer {
    /// Create a composer.
    pub fn new(max_reply_length: usize, promote: bool) -> Self {
        Self {
            max_reply_length,
            promote,
        }
    }

    /// Compose the reply to `post`.
    ///
    /// `requested` is true for mentions (the user asked) and false for posts
    /// from monitored accounts. Returns `None` when there is nothing worth
    /// saying: no source for an unrequested post, or a reply that cannot be
    /// made to fit.
    pub fn compose(
        &self,
        post: &Post,
        source: Option<&SourceResult>,
        requested: bool,
    ) -> Option<Reply> {
        let handle = post.author().handle();

        let text = match source {
            None if requested => self.apology(handle)?,
            None => {
                debug!(post_id = %post.id(), "No source for unrequested post, staying quiet");
                return None;
            }
            Some(source) => self.describe(handle, source, requested)?,
        };

        Some(Reply {
            text,
            in_reply_to: *post.id(),
            auto_populate_metadata: !requested,
        })
    }

    fn apology(&self, handle: &str) -> Option<String> {
        let text = format!("@{} Sorry, I couldn't find anything for you 😔", handle);
        let length = weighted_length(&text);
        if length > self.max_reply_length {
            warn!(
                length,
                max = self.max_reply_length,
                "Apology does not fit the reply limit, not sending"
            );
            return None;
        }
        Some(text)
    }

    fn describe(&self, handle: &str, source: &SourceResult, requested: bool) -> Option<String> {
        let header = if requested {
            format!("@{} I found something for you on {}!", handle, source.index_name())
        } else {
            format!("I found the source of this on {}!", source.index_name())
        };

        let mut draft = Draft {
            header,
            title: source.title(),
            title_chars: PREVIEW_CHARS,
            author: source
                .author_name()
                .filter(|a| !a.trim().is_empty())
                .map(|author| preview(author, PREVIEW_CHARS)),
            episode: source.episode().filter(|e| !e.trim().is_empty()),
            timestamp: source.timestamp().filter(|t| !t.trim().is_empty()),
            url: source.source_url(),
            promo: self.promote && !requested,
        };

        loop {
            let text = draft.render();
            let length = weighted_length(&text);
            if length <= self.max_reply_length {
                return Some(text);
            }
            if !draft.drop_next() {
                warn!(
                    length,
                    max = self.max_reply_length,
                    "Reply cannot be shortened enough, not sending"
                );
                return None;
            }
        }
    }
}

/// First `max_chars` characters of `text`, with [`ELLIPSIS`] appended when
/// anything was cut.
///
/// ```
/// use saucebot_bot::preview;
///
/// assert_eq!(preview("short", 32), "short");
/// assert_eq!(preview("abcdef", 3), "abc…");
/// ```
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Length as the platform counts it.
///
/// Latin, general punctuation and most other scripts below U+1100 weigh 1.
/// CJK, emoji and the rest weigh 2. Every URL weighs [`URL_WEIGHT`].
///
/// ```
/// use saucebot_bot::weighted_length;
///
/// assert_eq!(weighted_length("hi https://example.com/a/very/long/path"), 3 + 23);
/// assert_eq!(weighted_length("東方"), 4);
/// ```
pub fn weighted_length(text: &str) -> usize {
    let mut length: usize = text.chars().map(char_weight).sum();
    for token in text.split_whitespace() {
        if token.starts_with("http://") || token.starts_with("https://") {
            length = length - token.chars().map(char_weight).sum::<usize>() + URL_WEIGHT;
        }
    }
    length
}

fn char_weight(c: char) -> usize {
    let code = u32::from(c);
    if LIGHT_RANGES
        .iter()
        .any(|(start, end)| (*start..=*end).contains(&code))
    {
        1
    } else {
        2
    }
}
