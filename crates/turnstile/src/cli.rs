//! Command-line interface for turnstile.

use clap::Parser;
use std::path::PathBuf;
use turnstile::{Mark, MatchConfig, StrategyKind};

/// Turnstile - watch two threads play tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "turnstile")]
#[command(about = "Two player threads share one tic-tac-toe board", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML match config (defaults apply without one)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Strategy for player X
    #[arg(long, value_enum)]
    pub x_strategy: Option<StrategyKind>,

    /// Strategy for player O
    #[arg(long, value_enum)]
    pub o_strategy: Option<StrategyKind>,

    /// Mark that moves first (X or O)
    #[arg(long)]
    pub first: Option<Mark>,

    /// Seed for random players, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause after each accepted move, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Print the match report as JSON instead of the result line
    #[arg(long)]
    pub json: bool,

    /// Do not print the board after each move
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Layers command-line overrides on top of `config`.
    pub fn apply(&self, mut config: MatchConfig) -> MatchConfig {
        if let Some(strategy) = self.x_strategy {
            config = config.with_strategy(Mark::X, strategy);
        }
        if let Some(strategy) = self.o_strategy {
            config = config.with_strategy(Mark::O, strategy);
        }
        if let Some(first) = self.first {
            config = config.with_first(first);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(delay_ms) = self.delay_ms {
            config = config.with_move_delay_ms(delay_ms);
        }
        config
    }

    /// Whether to print the board after each move.
    pub fn renders_moves(&self) -> bool {
        !self.quiet && !self.json
    }
}
