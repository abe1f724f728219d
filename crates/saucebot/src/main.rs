//! SauceBot CLI binary.
//!
//! - `saucebot run` starts the bot server
//! - `saucebot lookup <URL>` resolves one image and prints the reply

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_lookup, handle_run};

    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    match cli.command {
        Commands::Run { config } => {
            handle_run(config).await?;
        }

        Commands::Lookup { url, config, json } => {
            handle_lookup(&url, config, json).await?;
        }
    }

    Ok(())
}
