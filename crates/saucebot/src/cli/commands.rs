//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SauceBot - finds the source of images posted on Twitter
#[derive(Parser, Debug)]
#[command(name = "saucebot")]
#[command(about = "Finds the source of images posted on Twitter", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot until Ctrl-C
    Run {
        /// Configuration file layered over the defaults
        #[arg(long, env = "SAUCEBOT_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Look up the source of one image and print the reply
    Lookup {
        /// Image URL
        url: String,

        /// Configuration file layered over the defaults
        #[arg(long, env = "SAUCEBOT_CONFIG")]
        config: Option<PathBuf>,

        /// Print the source as JSON instead of a reply
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_config() {
        let cli = Cli::try_parse_from(["saucebot", "run", "--config", "bot.toml", "-v"])
            .expect("Valid arguments");
        assert!(cli.verbose);
        assert!(!cli.json_logs);
        match cli.command {
            Commands::Run { config } => assert_eq!(config, Some(PathBuf::from("bot.toml"))),
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_lookup() {
        let cli = Cli::try_parse_from([
            "saucebot",
            "--json-logs",
            "lookup",
            "https://pbs.twimg.com/media/a.jpg",
            "--json",
        ])
        .expect("Valid arguments");
        assert!(cli.json_logs);
        match cli.command {
            Commands::Lookup { url, json, .. } => {
                assert_eq!(url, "https://pbs.twimg.com/media/a.jpg");
                assert!(json);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn lookup_requires_url() {
        assert!(Cli::try_parse_from(["saucebot", "lookup"]).is_err());
    }
}
