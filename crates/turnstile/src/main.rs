//! Turnstile - run one game between two player threads.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use turnstile::{ConsoleRenderer, Match, MatchConfig, MoveObserver, result_line};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with the board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => MatchConfig::from_file(path)?,
        None => MatchConfig::default(),
    };
    let config = cli.apply(config);
    debug!(?config, "Resolved match config");

    let observer: Option<Box<dyn MoveObserver>> = if cli.renders_moves() {
        Some(Box::new(ConsoleRenderer::stdout()))
    } else {
        None
    };

    let report = Match::from_config(&config, observer).run()?;
    info!(outcome = %report.outcome(), "Game complete");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", result_line(*report.outcome()));
    }

    Ok(())
}
