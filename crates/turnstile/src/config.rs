//! Match configuration.

use crate::player::DEFAULT_MOVE_DELAY;
use crate::strategy::StrategyKind;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};
use turnstile_tictactoe::Mark;

/// How one player chooses moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct PlayerConfig {
    /// Move-selection strategy.
    #[serde(default)]
    strategy: StrategyKind,

    /// Seed for the random strategy. Unseeded players draw from the OS.
    #[serde(default)]
    seed: Option<u64>,
}

/// Configuration for one game.
///
/// Defaults reproduce the classic setup: X plays sequentially and moves
/// first, O guesses at random, and each player pauses 100 ms after a move.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Mark that moves first.
    #[serde(default = "default_first")]
    first: Mark,

    /// Pause after each accepted move, in milliseconds.
    #[serde(default = "default_move_delay_ms")]
    move_delay_ms: u64,

    /// Player X settings.
    #[serde(default = "default_player_x")]
    player_x: PlayerConfig,

    /// Player O settings.
    #[serde(default = "default_player_o")]
    player_o: PlayerConfig,
}

fn default_first() -> Mark {
    Mark::X
}

fn default_move_delay_ms() -> u64 {
    DEFAULT_MOVE_DELAY.as_millis() as u64
}

fn default_player_x() -> PlayerConfig {
    PlayerConfig::new(StrategyKind::Sequential, None)
}

fn default_player_o() -> PlayerConfig {
    PlayerConfig::new(StrategyKind::Random, None)
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            first: default_first(),
            move_delay_ms: default_move_delay_ms(),
            player_x: default_player_x(),
            player_o: default_player_o(),
        }
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(first = %config.first, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Settings for the player holding `mark`.
    pub fn player(&self, mark: Mark) -> &PlayerConfig {
        match mark {
            Mark::X => &self.player_x,
            Mark::O => &self.player_o,
        }
    }

    /// Pause after each accepted move.
    pub fn move_delay(&self) -> Duration {
        Duration::from_millis(self.move_delay_ms)
    }

    /// Sets which mark moves first.
    pub fn with_first(mut self, first: Mark) -> Self {
        self.first = first;
        self
    }

    /// Sets the pause after each accepted move.
    pub fn with_move_delay_ms(mut self, move_delay_ms: u64) -> Self {
        self.move_delay_ms = move_delay_ms;
        self
    }

    /// Sets the strategy for the player holding `mark`.
    pub fn with_strategy(mut self, mark: Mark, strategy: StrategyKind) -> Self {
        self.player_mut(mark).strategy = strategy;
        self
    }

    /// Seeds both players: X with `seed`, O with `seed + 1`, so two random
    /// players never mirror each other.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.player_x.seed = Some(seed);
        self.player_o.seed = Some(seed.wrapping_add(1));
        self
    }

    fn player_mut(&mut self, mark: Mark) -> &mut PlayerConfig {
        match mark {
            Mark::X => &mut self.player_x,
            Mark::O => &mut self.player_o,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
