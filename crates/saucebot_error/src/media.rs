//! Media extraction signal.

/// Why a post yielded no usable media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NoMediaReason {
    /// Neither extended nor basic media entities are present.
    #[display("no downloadable media attached")]
    NoEntities,
    /// The post replies to something we cannot fetch.
    #[display("reply target no longer exists or is not visible")]
    ReplyTargetUnavailable,
}

/// A post has nothing to look up.
///
/// This is a routine skip signal, not a failure. Callers log it at info level
/// and move on to the next post.
///
/// # Examples
///
/// ```
/// use saucebot_error::{NoMediaError, NoMediaReason};
///
/// let err = NoMediaError::new(1234, NoMediaReason::NoEntities);
/// assert_eq!(err.post_id, 1234);
/// assert!(format!("{}", err).contains("1234"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("No media in post {}: {} at line {} in {}", post_id, reason, line, file)]
pub struct NoMediaError {
    /// Post that was inspected
    pub post_id: u64,
    /// Why it was unusable
    pub reason: NoMediaReason,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl NoMediaError {
    /// Create a new no-media signal with automatic location tracking.
    #[track_caller]
    pub fn new(post_id: u64, reason: NoMediaReason) -> Self {
        let location = std::panic::Location::caller();
        Self {
            post_id,
            reason,
            line: location.line(),
            file: location.file(),
        }
    }
}
