//! Console rendering of moves and results.

use crate::session::MoveObserver;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::warn;
use turnstile_tictactoe::{Board, Move, Outcome};

/// Prints the board after every accepted move.
#[derive(Debug)]
pub struct ConsoleRenderer<W = io::Stdout> {
    out: Mutex<W>,
}

impl ConsoleRenderer {
    /// Renderer writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleRenderer<W> {
    /// Renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consumes the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> MoveObserver for ConsoleRenderer<W> {
    fn on_move(&self, mv: &Move, board: &Board, _outcome: Outcome) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = write!(out, "\n{}\n\n{}", mv, board).and_then(|_| out.flush()) {
            warn!(error = %e, "Failed to render move");
        }
    }
}

/// Final line announcing the result.
pub fn result_line(outcome: Outcome) -> String {
    match outcome {
        Outcome::Won(mark) => format!("Winner: {}", mark),
        Outcome::Draw => "Draw!".to_string(),
        Outcome::InProgress => "Game still in progress".to_string(),
    }
}
