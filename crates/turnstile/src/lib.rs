//! Turnstile - two threads, one tic-tac-toe board.
//!
//! Each player runs on its own thread and submits moves to a shared
//! [`GameSession`]. The session serializes every move under one lock and
//! parks whichever player is out of turn until its turn comes or the game
//! ends.
//!
//! # Architecture
//!
//! - **Session**: lock + condition around the game record; the only place
//!   game state changes
//! - **Strategy**: pure move selection (sequential scan, random guess)
//! - **Player**: a thread looping strategy -> session until the game ends
//! - **Match**: builds both players from config, runs them, reports
//!
//! # Example
//!
//! ```no_run
//! use turnstile::{Match, MatchConfig};
//!
//! # fn example() -> anyhow::Result<()> {
//! let report = Match::from_config(&MatchConfig::default(), None).run()?;
//! println!("{}", turnstile::result_line(*report.outcome()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod game_match;
mod player;
mod render;
mod session;
mod strategy;

pub use config::{ConfigError, MatchConfig, PlayerConfig};
pub use game_match::{Match, MatchError, MatchReport};
pub use player::{DEFAULT_MOVE_DELAY, Player, PlayerReport};
pub use render::{ConsoleRenderer, result_line};
pub use session::{GameSession, MoveObserver};
pub use strategy::{RandomGuess, Sequential, Strategy, StrategyKind};

pub use turnstile_tictactoe::{
    Board, GameRecord, Mark, Move, MoveRejection, Outcome, Position, Square,
};
