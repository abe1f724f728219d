//! SauceNAO HTTP client.

use super::config::SauceNaoConfig;
use super::convert::to_source;
use super::dto::SearchResponse;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use saucebot_core::SourceResult;
use saucebot_error::{LookupError, LookupErrorKind};
use saucebot_interface::{LookupResult, SauceLookup};
use tracing::{debug, error, instrument, warn};

const SAUCENAO_API_URL: &str = "https://saucenao.com/search.php";

/// Search every index.
const ALL_INDEXES: &str = "999";

/// JSON output.
const OUTPUT_TYPE_JSON: &str = "2";

/// SauceNAO API client.
///
/// # Example
///
/// ```no_run
/// use saucebot_interface::SauceLookup;
/// use saucebot_lookup::{SauceNaoClient, SauceNaoConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SauceNaoClient::new(std::env::var("SAUCENAO_API_KEY")?, SauceNaoConfig::default())?;
/// let matches = client.lookup("https://pbs.twimg.com/media/abc.jpg").await?;
/// if let Some(best) = matches.first() {
///     println!("{} ({})", best.title(), best.source_url());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SauceNaoClient {
    client: Client,
    api_key: String,
    config: SauceNaoConfig,
    base_url: String,
}

impl SauceNaoClient {
    /// Creates a new SauceNAO client.
    ///
    /// # Errors
    ///
    /// Returns [`LookupErrorKind::InvalidApiKey`] for an empty key, or an
    /// HTTP error if the underlying client cannot be built.
    pub fn new(api_key: impl Into<String>, config: SauceNaoConfig) -> LookupResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LookupError::new(LookupErrorKind::InvalidApiKey));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LookupError::new(LookupErrorKind::Http(e.to_string())))?;

        debug!(
            min_similarity = config.min_similarity(),
            results = config.results(),
            "Creating new SauceNAO client"
        );
        Ok(Self {
            client,
            api_key,
            config,
            base_url: SAUCENAO_API_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (e.g. a proxy).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Client settings.
    pub fn config(&self) -> &SauceNaoConfig {
        &self.config
    }

    #[instrument(skip(self))]
    async fn search(&self, media_url: &str) -> LookupResult<SearchResponse> {
        let numres = self.config.results().to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("output_type", OUTPUT_TYPE_JSON),
                ("db", ALL_INDEXES),
                ("numres", numres.as_str()),
                ("api_key", self.api_key.as_str()),
                ("url", media_url),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to SauceNAO");
                LookupError::new(LookupErrorKind::Http(e.to_string()))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LookupError::new(LookupErrorKind::Http(e.to_string())))?;

        if !status.is_success() {
            return Err(LookupError::new(classify_status(status, &body)));
        }

        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = ?e, "Failed to parse SauceNAO response");
            LookupError::new(LookupErrorKind::Parse(e.to_string()))
        })?;

        if parsed.header.status != 0 {
            let message = parsed.header.message.clone().unwrap_or_default();
            error!(status = parsed.header.status, message = %message, "SauceNAO reported a failure");
            return Err(LookupError::new(LookupErrorKind::Api {
                status: parsed.header.status,
                message,
            }));
        }

        if parsed.header.short_remaining == Some(0) {
            warn!("SauceNAO short search quota exhausted; next search will be throttled");
        }
        debug!(
            short_remaining = ?parsed.header.short_remaining,
            long_remaining = ?parsed.header.long_remaining,
            results = parsed.results.len(),
            "Received SauceNAO response"
        );

        Ok(parsed)
    }
}

/// Map a non-success HTTP status to an error kind.
fn classify_status(status: StatusCode, body: &str) -> LookupErrorKind {
    match status {
        StatusCode::TOO_MANY_REQUESTS if body.contains("Daily Search Limit") => {
            LookupErrorKind::DailyLimitReached
        }
        StatusCode::TOO_MANY_REQUESTS => LookupErrorKind::RateLimited,
        StatusCode::FORBIDDEN => LookupErrorKind::InvalidApiKey,
        _ => LookupErrorKind::Api {
            status: i32::from(status.as_u16()),
            message: body.chars().take(200).collect(),
        },
    }
}

/// Convert, filter by similarity and rank best first.
fn rank(response: &SearchResponse, min_similarity: f32) -> Vec<SourceResult> {
    let mut sources: Vec<SourceResult> = response
        .results
        .iter()
        .filter_map(to_source)
        .filter(|source| source.similarity() >= min_similarity)
        .collect();
    sources.sort_by(|a, b| b.similarity().total_cmp(&a.similarity()));
    sources
}

#[async_trait]
impl SauceLookup for SauceNaoClient {
    #[instrument(skip(self))]
    async fn lookup(&self, media_url: &str) -> LookupResult<Vec<SourceResult>> {
        let response = self.search(media_url).await?;
        let sources = rank(&response, *self.config.min_similarity());
        debug!(matches = sources.len(), "Ranked SauceNAO results");
        Ok(sources)
    }

    fn service_name(&self) -> &'static str {
        "saucenao"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_limit_is_rate_limited() {
        let kind = classify_status(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"header":{"status":-2,"message":"Search Rate Too High."}}"#,
        );
        assert!(kind.is_rate_limited());
    }

    #[test]
    fn daily_limit_is_not_retriable() {
        let kind = classify_status(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"header":{"status":-2,"message":"Daily Search Limit Exceeded."}}"#,
        );
        assert_eq!(kind, LookupErrorKind::DailyLimitReached);
        assert!(!kind.is_rate_limited());
    }

    #[test]
    fn forbidden_is_invalid_key() {
        assert_eq!(
            classify_status(StatusCode::FORBIDDEN, ""),
            LookupErrorKind::InvalidApiKey
        );
    }

    #[test]
    fn rank_filters_and_sorts() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "header": {"status": 0, "short_remaining": 3, "long_remaining": 90},
                "results": [
                    {"header": {"similarity": "61.0", "index_id": 9, "index_name": "Index #9: Danbooru - a.jpg"},
                     "data": {"ext_urls": ["https://danbooru.donmai.us/post/show/1"], "material": "original"}},
                    {"header": {"similarity": "12.5", "index_id": 5, "index_name": "Index #5: Pixiv Images - b.jpg"},
                     "data": {"ext_urls": ["https://www.pixiv.net/artworks/2"], "title": "Noise"}},
                    {"header": {"similarity": "94.2", "index_id": 5, "index_name": "Index #5: Pixiv Images - c.jpg"},
                     "data": {"ext_urls": ["https://www.pixiv.net/artworks/3"], "title": "Best"}}
                ]
            }"#,
        )
        .expect("Valid fixture");

        let ranked = rank(&response, 50.0);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].title(), "Best");
        assert_eq!(ranked[1].index_name(), "Danbooru");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = SauceNaoClient::new("  ", SauceNaoConfig::default()).unwrap_err();
        assert_eq!(err.kind, LookupErrorKind::InvalidApiKey);
    }
}
