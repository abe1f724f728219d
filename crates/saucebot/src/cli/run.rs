//! Bot server command handler.

use super::{SAUCENAO_API_KEY, TWITTER_BEARER_TOKEN, secret};
use saucebot::{
    BotConfig, BotServer, ConfigAccountSource, SauceNaoClient, SauceResult, TwitterClient,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Handle the `run` command
pub async fn handle_run(config_path: Option<PathBuf>) -> SauceResult<()> {
    let config = BotConfig::load(config_path.as_deref())?;

    let twitter = TwitterClient::new(secret(TWITTER_BEARER_TOKEN)?)?;
    let saucenao = SauceNaoClient::new(secret(SAUCENAO_API_KEY)?, config.saucenao().clone())?;
    let accounts = ConfigAccountSource::new(config_path, config.twitter().accounts());

    tracing::info!(
        accounts = ?config.twitter().accounts(),
        "Bot server starting. Press Ctrl+C to stop."
    );

    BotServer::new(
        config,
        Arc::new(twitter),
        Arc::new(saucenao),
        Arc::new(accounts),
    )
    .start()
    .await
}
