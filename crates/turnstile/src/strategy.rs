//! Move-selection strategies.
//!
//! A strategy maps a board snapshot to a candidate square. It never touches
//! the session; the player hands the candidate to the session, which is free
//! to refuse it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use turnstile_tictactoe::{Board, Position};

/// Picks the next square to try.
pub trait Strategy: Send {
    /// Candidate square for the given board, or `None` if this strategy has
    /// nothing to offer.
    fn select(&mut self, board: &Board) -> Option<Position>;

    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;
}

/// Available strategies.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StrategyKind {
    /// First empty square in row-major order.
    #[default]
    Sequential,
    /// Uniformly random square, empty or not.
    Random,
}

impl StrategyKind {
    /// Builds a strategy of this kind.
    ///
    /// `seed` fixes the random sequence; without one the random strategy
    /// seeds itself from the OS. Sequential ignores it.
    #[instrument]
    pub fn build(self, seed: Option<u64>) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Sequential => Box::new(Sequential),
            StrategyKind::Random => match seed {
                Some(seed) => Box::new(RandomGuess::seeded(seed)),
                None => Box::new(RandomGuess::from_entropy()),
            },
        }
    }
}

/// Scans squares in row-major order and takes the first empty one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Strategy for Sequential {
    fn select(&mut self, board: &Board) -> Option<Position> {
        Position::ALL.into_iter().find(|pos| board.is_empty(*pos))
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Sequential
    }
}

/// Guesses any of the nine squares uniformly at random.
///
/// Occupied squares are not filtered out; the session rejects them and the
/// player simply guesses again. Each instance owns its generator, so two
/// players never share random state.
#[derive(Debug, Clone)]
pub struct RandomGuess {
    rng: ChaCha8Rng,
}

impl RandomGuess {
    /// Deterministic generator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Strategy for RandomGuess {
    fn select(&mut self, _board: &Board) -> Option<Position> {
        let pos = Position::from_index(self.rng.gen_range(0..Position::ALL.len()));
        debug!(?pos, "Random guess");
        pos
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Random
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use turnstile_tictactoe::Mark;

    #[test]
    fn test_sequential_takes_first_empty() {
        let mut board = Board::new();
        let mut strategy = Sequential;
        assert_eq!(strategy.select(&board), Some(Position::TopLeft));

        board.place(0, 0, Mark::X);
        board.place(0, 1, Mark::O);
        assert_eq!(strategy.select(&board), Some(Position::TopRight));
    }

    #[test]
    fn test_sequential_full_board_has_no_candidate() {
        let mut board = Board::new();
        for (i, pos) in Position::ALL.into_iter().enumerate() {
            board.place_at(pos, if i % 2 == 0 { Mark::X } else { Mark::O });
        }
        assert_eq!(Sequential.select(&board), None);
    }

    #[test]
    fn test_random_is_reproducible_for_a_seed() {
        let board = Board::new();
        let mut a = RandomGuess::seeded(7);
        let mut b = RandomGuess::seeded(7);
        let left: Vec<_> = (0..32).map(|_| a.select(&board)).collect();
        let right: Vec<_> = (0..32).map(|_| b.select(&board)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_random_covers_every_square_including_occupied() {
        let mut board = Board::new();
        board.place(1, 1, Mark::X);
        let mut strategy = RandomGuess::seeded(42);
        let seen: HashSet<_> = (0..500).filter_map(|_| strategy.select(&board)).collect();
        assert_eq!(seen.len(), 9);
        assert!(seen.contains(&Position::Center));
    }

    #[test]
    fn test_kind_parses_and_builds() {
        assert_eq!("sequential".parse::<StrategyKind>().ok(), Some(StrategyKind::Sequential));
        assert_eq!("random".parse::<StrategyKind>().ok(), Some(StrategyKind::Random));
        assert_eq!(StrategyKind::Random.to_string(), "random");
        assert_eq!(StrategyKind::Random.build(Some(1)).kind(), StrategyKind::Random);
        assert_eq!(StrategyKind::Sequential.build(None).kind(), StrategyKind::Sequential);
    }
}
