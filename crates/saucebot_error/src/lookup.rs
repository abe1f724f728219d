//! Reverse image lookup error types.

/// Reverse image lookup error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum LookupErrorKind {
    /// Short-term (per 30 seconds) search limit exceeded. Retriable.
    #[display("Short search limit reached")]
    RateLimited,
    /// Daily search quota exhausted.
    #[display("Daily search limit reached")]
    DailyLimitReached,
    /// API key missing or rejected.
    #[display("Invalid or missing API key")]
    InvalidApiKey,
    /// The lookup service reported a failure.
    #[display("Lookup API error {}: {}", status, message)]
    Api {
        /// HTTP status or service status code
        status: i32,
        /// Error detail
        message: String,
    },
    /// The request never produced a response.
    #[display("Lookup request failed: {}", _0)]
    Http(String),
    /// The response could not be decoded.
    #[display("Failed to parse lookup response: {}", _0)]
    Parse(String),
}

impl LookupErrorKind {
    /// Check if this error should be retried after a backoff.
    ///
    /// Only the short-term rate limit qualifies; every other failure is final.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, LookupErrorKind::RateLimited)
    }
}

/// Reverse image lookup error with location tracking.
///
/// # Examples
///
/// ```
/// use saucebot_error::{LookupError, LookupErrorKind};
///
/// let err = LookupError::new(LookupErrorKind::RateLimited);
/// assert!(err.is_rate_limited());
///
/// let err = LookupError::new(LookupErrorKind::DailyLimitReached);
/// assert!(!err.is_rate_limited());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Lookup Error: {} at line {} in {}", kind, line, file)]
pub struct LookupError {
    /// The kind of error that occurred
    pub kind: LookupErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LookupError {
    /// Create a new lookup error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LookupErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Check if this error is a retriable short-term rate limit.
    pub fn is_rate_limited(&self) -> bool {
        self.kind.is_rate_limited()
    }
}

impl From<LookupErrorKind> for LookupError {
    #[track_caller]
    fn from(kind: LookupErrorKind) -> Self {
        Self::new(kind)
    }
}
