//! Conversion from SauceNAO wire types to [`SourceResult`].

use super::dto::SearchResult;
use saucebot_core::{SourceInfoBuilder, SourceResult};
use serde_json::Value as JsonValue;
use tracing::debug;

/// Indexes whose matches are frames from a video.
const VIDEO_INDEXES: [u32; 4] = [
    21, // Anime
    22, // H-Anime
    23, // Movies
    24, // Shows
];

const TITLE_FIELDS: [&str; 5] = ["title", "source", "eng_name", "jp_name", "material"];
const AUTHOR_FIELDS: [&str; 3] = ["member_name", "author_name", "creator"];

/// Convert one raw match. Returns `None` for matches without a usable URL
/// or with an unparseable similarity.
pub(crate) fn to_source(result: &SearchResult) -> Option<SourceResult> {
    let similarity: f32 = match result.header.similarity.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            debug!(similarity = %result.header.similarity, "Skipping result with bad similarity");
            return None;
        }
    };

    let Some(source_url) = source_url(&result.data) else {
        debug!(index_id = result.header.index_id, "Skipping result without a source URL");
        return None;
    };

    let title = first_text(&result.data, &TITLE_FIELDS)
        .filter(|t| !is_url(t))
        .unwrap_or_else(|| "Unknown".to_string());

    let mut builder = SourceInfoBuilder::default();
    builder
        .index_id(result.header.index_id)
        .index_name(index_name(&result.header.index_name))
        .title(title)
        .source_url(source_url)
        .similarity(similarity);
    if let Some(author) = first_text(&result.data, &AUTHOR_FIELDS) {
        builder.author_name(author);
    }

    let info = match builder.build() {
        Ok(info) => info,
        Err(e) => {
            debug!(error = %e, "Skipping incomplete result");
            return None;
        }
    };

    if VIDEO_INDEXES.contains(&result.header.index_id) {
        Some(SourceResult::Video {
            info,
            episode: text(&result.data, "part"),
            timestamp: text(&result.data, "est_time"),
        })
    } else {
        Some(SourceResult::Generic(info))
    }
}

/// Human part of an index label: `"Index #5: Pixiv Images - 1234_p0.jpg"` → `"Pixiv Images"`.
pub(crate) fn index_name(label: &str) -> String {
    let name = label.split_once(": ").map_or(label, |(_, rest)| rest);
    let name = name.split_once(" - ").map_or(name, |(name, _)| name);
    name.trim().to_string()
}

fn source_url(data: &JsonValue) -> Option<String> {
    if let Some(url) = data
        .get("ext_urls")
        .and_then(JsonValue::as_array)
        .and_then(|urls| urls.iter().find_map(JsonValue::as_str))
    {
        return Some(url.to_string());
    }
    text(data, "source").filter(|s| is_url(s))
}

fn first_text(data: &JsonValue, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| text(data, field))
}

/// Read a field as non-empty text. Numbers are stringified; arrays yield
/// their first string entry.
fn text(data: &JsonValue, field: &str) -> Option<String> {
    let value = match data.get(field)? {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Array(items) => items.iter().find_map(JsonValue::as_str)?.trim().to_string(),
        _ => return None,
    };
    (!value.is_empty()).then_some(value)
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::saucenao::dto::ResultHeader;
    use serde_json::json;

    fn result(index_id: u32, index_name: &str, similarity: &str, data: JsonValue) -> SearchResult {
        SearchResult {
            header: ResultHeader {
                similarity: similarity.to_string(),
                index_id,
                index_name: index_name.to_string(),
            },
            data,
        }
    }

    #[test]
    fn index_name_strips_prefix_and_filename() {
        assert_eq!(index_name("Index #5: Pixiv Images - 1234_p0.jpg"), "Pixiv Images");
        assert_eq!(index_name("Index #9: Danbooru - abc.jpg"), "Danbooru");
        assert_eq!(index_name("Anime"), "Anime");
    }

    #[test]
    fn pixiv_result_is_generic() {
        let raw = result(
            5,
            "Index #5: Pixiv Images - 1234_p0.jpg",
            "93.21",
            json!({
                "ext_urls": ["https://www.pixiv.net/member_illust.php?mode=medium&illust_id=1234"],
                "title": "Sunset",
                "member_name": "someone",
                "member_id": 42
            }),
        );

        let source = to_source(&raw).expect("Convertible");
        assert!(!source.is_video());
        assert_eq!(source.index_name(), "Pixiv Images");
        assert_eq!(source.title(), "Sunset");
        assert_eq!(source.author_name(), Some("someone"));
        assert!((source.similarity() - 93.21).abs() < 0.001);
    }

    #[test]
    fn anime_result_is_video_with_episode_and_timestamp() {
        let raw = result(
            21,
            "Index #21: Anime - bebop.jpg",
            "91.0",
            json!({
                "ext_urls": ["https://anidb.net/anime/23"],
                "source": "Cowboy Bebop",
                "part": "5",
                "est_time": "00:12:31 / 00:23:40"
            }),
        );

        let source = to_source(&raw).expect("Convertible");
        assert!(source.is_video());
        assert_eq!(source.title(), "Cowboy Bebop");
        assert_eq!(source.episode(), Some("5"));
        assert_eq!(source.timestamp(), Some("00:12:31 / 00:23:40"));
        assert_eq!(source.author_name(), None);
    }

    #[test]
    fn creator_array_uses_first_entry() {
        let raw = result(
            9,
            "Index #9: Danbooru - x.jpg",
            "80.5",
            json!({
                "ext_urls": ["https://danbooru.donmai.us/post/show/1"],
                "creator": ["artist_a", "artist_b"],
                "material": "original"
            }),
        );

        let source = to_source(&raw).expect("Convertible");
        assert_eq!(source.author_name(), Some("artist_a"));
        assert_eq!(source.title(), "original");
    }

    #[test]
    fn source_field_url_is_fallback_link_not_title() {
        let raw = result(
            12,
            "Index #12: Yande.re - y.jpg",
            "70",
            json!({ "source": "https://twitter.com/someone/status/1" }),
        );

        let source = to_source(&raw).expect("Convertible");
        assert_eq!(source.source_url(), "https://twitter.com/someone/status/1");
        assert_eq!(source.title(), "Unknown");
    }

    #[test]
    fn result_without_url_is_dropped() {
        let raw = result(5, "Index #5: Pixiv Images", "90", json!({ "title": "No link" }));
        assert!(to_source(&raw).is_none());
    }

    #[test]
    fn unparseable_similarity_is_dropped() {
        let raw = result(
            5,
            "Index #5: Pixiv Images",
            "n/a",
            json!({ "ext_urls": ["https://example.com"] }),
        );
        assert!(to_source(&raw).is_none());
    }
}
