//! One-off lookup command handler.

use super::{SAUCENAO_API_KEY, secret};
use saucebot::{
    Author, BotConfig, BotMetrics, JsonError, LookupCache, MediaItem, MediaKind, Post, PostId,
    ReplyComposer, SauceNaoClient, SauceResolver, SauceResult,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Handle the `lookup` command
pub async fn handle_lookup(url: &str, config_path: Option<PathBuf>, json: bool) -> SauceResult<()> {
    let config = BotConfig::load(config_path.as_deref())?;
    let saucenao = SauceNaoClient::new(secret(SAUCENAO_API_KEY)?, config.saucenao().clone())?;

    let resolver = SauceResolver::new(
        Arc::new(saucenao),
        Arc::new(LookupCache::new(config.cache().clone())),
        config.resolver().clone(),
        BotMetrics::new(),
    );
    let source = resolver.resolve(&MediaItem::new(url, MediaKind::Photo)).await;

    if json {
        let text = serde_json::to_string_pretty(&source)
            .map_err(|e| JsonError::new(format!("Failed to serialize source: {}", e)))?;
        println!("{}", text);
        return Ok(());
    }

    let composer = ReplyComposer::new(*config.twitter().max_reply_length(), false);
    let post = Post::new(PostId::FLOOR, Author::new("0", "you"));
    match composer.compose(&post, source.as_ref(), true) {
        Some(reply) => println!("{}", reply.text()),
        None => println!(
            "Found a source, but no reply fits in {} characters",
            config.twitter().max_reply_length()
        ),
    }
    Ok(())
}
