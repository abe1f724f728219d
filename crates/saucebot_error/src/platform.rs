//! Social platform error types.

/// Social platform error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PlatformErrorKind {
    /// The requested post was deleted or is not visible to us.
    #[display("Post not found or inaccessible: {}", _0)]
    NotFound(u64),
    /// Credentials were rejected.
    #[display("Unauthorized: {}", _0)]
    Unauthorized(String),
    /// Platform rate limit hit.
    #[display("Platform rate limit exceeded")]
    RateLimited,
    /// The platform answered with a non-success status.
    #[display("Platform API error {}: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or error detail
        message: String,
    },
    /// The request never produced a response.
    #[display("Platform request failed: {}", _0)]
    Http(String),
    /// The response could not be decoded.
    #[display("Failed to parse platform response: {}", _0)]
    Parse(String),
    /// Handle does not resolve to an account.
    #[display("Unknown account: {}", _0)]
    UnknownAccount(String),
}

/// Social platform error with location tracking.
///
/// # Examples
///
/// ```
/// use saucebot_error::{PlatformError, PlatformErrorKind};
///
/// let err = PlatformError::new(PlatformErrorKind::NotFound(42));
/// assert!(err.is_not_found());
/// assert!(format!("{}", err).contains("42"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The kind of error that occurred
    pub kind: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new platform error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether the error means the post no longer exists (or is hidden from us).
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, PlatformErrorKind::NotFound(_))
    }
}

impl From<PlatformErrorKind> for PlatformError {
    #[track_caller]
    fn from(kind: PlatformErrorKind) -> Self {
        Self::new(kind)
    }
}
