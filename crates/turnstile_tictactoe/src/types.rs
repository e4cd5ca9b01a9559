//! Core domain types for tic-tac-toe.

use super::position::Position;
use super::rules;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Side length of the board.
pub const SIZE: usize = 3;

/// Mark a player places on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X (moves first unless configured otherwise).
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark. Never reverts to `Empty`.
    Occupied(Mark),
}

impl Square {
    fn glyph(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Occupied(Mark::X) => 'X',
            Square::Occupied(Mark::O) => 'O',
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; SIZE * SIZE],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; SIZE * SIZE],
        }
    }

    /// Gets the square at `row, col`, or `None` when off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Square> {
        Position::from_coords(row, col).map(|pos| self.square(pos))
    }

    /// Gets the square at a position.
    pub fn square(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if the square at a position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.square(pos) == Square::Empty
    }

    /// Places `mark` at `row, col`.
    ///
    /// Takes effect only when the coordinates are on the board and the
    /// square is empty. Returns whether the board changed.
    #[instrument(skip(self))]
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> bool {
        match Position::from_coords(row, col) {
            Some(pos) => self.place_at(pos, mark),
            None => false,
        }
    }

    /// Places `mark` at a position if the square is empty.
    pub fn place_at(&mut self, pos: Position, mark: Mark) -> bool {
        if !self.is_empty(pos) {
            return false;
        }
        self.squares[pos.to_index()] = Square::Occupied(mark);
        true
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; SIZE * SIZE] {
        &self.squares
    }

    /// Positions that are still empty, in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Number of marks on the board.
    pub fn mark_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// True if `mark` owns a complete row, column, or diagonal.
    pub fn check_win(&self, mark: Mark) -> bool {
        rules::check_win(self, mark)
    }

    /// True if the board is full and neither mark owns a line.
    pub fn check_draw(&self) -> bool {
        rules::check_draw(self)
    }

    /// The mark owning a complete line, if any.
    pub fn winner(&self) -> Option<Mark> {
        rules::winner(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.squares.chunks(SIZE).enumerate() {
            let line: Vec<String> = cells.iter().map(|s| s.glyph().to_string()).collect();
            writeln!(f, " {}", line.join(" | "))?;
            if row < SIZE - 1 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}

/// Classification of a game: still running, or how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is ongoing.
    InProgress,
    /// Game ended with three in a row for a mark.
    Won(Mark),
    /// Board filled without a line.
    Draw,
}

impl Outcome {
    /// True once the game has ended. Terminal outcomes never change.
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Won(mark) => write!(f, "won by {}", mark),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
