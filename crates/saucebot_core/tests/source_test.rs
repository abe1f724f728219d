//! Tests for source result accessors.

use saucebot_core::{SourceInfo, SourceInfoBuilder, SourceResult};

fn info(title: &str) -> SourceInfo {
    SourceInfoBuilder::default()
        .index_id(21u32)
        .index_name("Anime")
        .title(title)
        .source_url("https://anidb.net/anime/1")
        .similarity(88.0f32)
        .build()
        .expect("Valid source info")
}

#[test]
fn test_generic_has_no_video_fields() {
    let source = SourceResult::Generic(info("Cowboy Bebop"));

    assert!(!source.is_video());
    assert_eq!(source.episode(), None);
    assert_eq!(source.timestamp(), None);
    assert_eq!(source.author_name(), None);
    assert_eq!(source.title(), "Cowboy Bebop");
}

#[test]
fn test_video_exposes_common_and_video_fields() {
    let source = SourceResult::Video {
        info: info("Cowboy Bebop"),
        episode: Some("5".to_string()),
        timestamp: Some("00:12:31 / 00:23:40".to_string()),
    };

    assert!(source.is_video());
    assert_eq!(source.index_name(), "Anime");
    assert_eq!(source.source_url(), "https://anidb.net/anime/1");
    assert_eq!(source.episode(), Some("5"));
    assert_eq!(source.timestamp(), Some("00:12:31 / 00:23:40"));
    assert_eq!(source.similarity(), 88.0);
}

#[test]
fn test_source_result_serializes_with_kind_tag() {
    let source = SourceResult::Generic(info("Trigun"));
    let json = serde_json::to_value(&source).expect("Serializable");

    assert_eq!(json["kind"], "generic");
    assert_eq!(json["title"], "Trigun");
}
