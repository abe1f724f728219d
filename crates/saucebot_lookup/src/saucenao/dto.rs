//! Wire types for the SauceNAO JSON API (`output_type=2`).

use serde::Deserialize;
use serde_json::Value as JsonValue;

/// Top-level search response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    pub(crate) header: ResponseHeader,
    #[serde(default)]
    pub(crate) results: Vec<SearchResult>,
}

/// Account and query status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResponseHeader {
    /// 0 on success, > 0 server side failure, < 0 client side failure
    pub(crate) status: i32,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) short_remaining: Option<i32>,
    #[serde(default)]
    pub(crate) long_remaining: Option<i32>,
}

/// A single match.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResult {
    pub(crate) header: ResultHeader,
    /// Index specific payload; field names differ between indexes.
    #[serde(default)]
    pub(crate) data: JsonValue,
}

/// Match metadata common to all indexes.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ResultHeader {
    /// Percentage as a string, e.g. "93.21"
    pub(crate) similarity: String,
    pub(crate) index_id: u32,
    pub(crate) index_name: String,
}
