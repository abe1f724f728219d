//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, LookupError, NoMediaError, PlatformError};

/// All error conditions surfaced by SauceBot crates.
///
/// # Examples
///
/// ```
/// use saucebot_error::{SauceError, SauceErrorKind, LookupError, LookupErrorKind};
///
/// let err: SauceError = LookupError::new(LookupErrorKind::RateLimited).into();
/// assert!(matches!(err.kind(), SauceErrorKind::Lookup(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum SauceErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Social platform error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Reverse image lookup error
    #[from(LookupError)]
    Lookup(LookupError),
    /// Post carried no usable media
    #[from(NoMediaError)]
    NoMedia(NoMediaError),
}

/// SauceBot error with kind discrimination.
///
/// # Examples
///
/// ```
/// use saucebot_error::{SauceError, SauceResult, ConfigError};
///
/// fn might_fail() -> SauceResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("SauceBot Error: {}", _0)]
pub struct SauceError(Box<SauceErrorKind>);

impl SauceError {
    /// Create a new error from a kind.
    pub fn new(kind: SauceErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &SauceErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to SauceErrorKind
impl<T> From<T> for SauceError
where
    T: Into<SauceErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for SauceBot operations.
pub type SauceResult<T> = std::result::Result<T, SauceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LookupErrorKind, PlatformErrorKind};

    #[test]
    fn transport_failures_keep_their_collaborator_kind() {
        let err: SauceError =
            PlatformError::new(PlatformErrorKind::Http("connection refused".to_string())).into();
        assert!(matches!(err.kind(), SauceErrorKind::Platform(_)));

        let err: SauceError =
            LookupError::new(LookupErrorKind::Http("timed out".to_string())).into();
        assert!(matches!(err.kind(), SauceErrorKind::Lookup(_)));
    }
}
