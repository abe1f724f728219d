//! Content fingerprints used as cache keys.

/// MD5 hex digest of a media URL.
///
/// # Examples
///
/// ```
/// use saucebot_cache::Fingerprint;
///
/// let a = Fingerprint::from_url("https://pbs.twimg.com/media/abc.jpg");
/// let b = Fingerprint::from_url("https://pbs.twimg.com/media/abc.jpg");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{}", _0)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint a media URL.
    pub fn from_url(url: &str) -> Self {
        Self(format!("{:x}", md5::compute(url.as_bytes())))
    }

    /// Hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            Fingerprint::from_url("").as_str(),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn distinct_urls_differ() {
        assert_ne!(
            Fingerprint::from_url("https://example.com/a.jpg"),
            Fingerprint::from_url("https://example.com/b.jpg")
        );
    }
}
