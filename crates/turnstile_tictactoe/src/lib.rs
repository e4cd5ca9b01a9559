//! Pure tic-tac-toe game logic.
//!
//! Board state, win/draw evaluation, move records, and the invariants every
//! reachable game satisfies. Nothing in this crate is shared between threads;
//! the `turnstile` crate wraps [`GameRecord`] behind a lock.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod invariants;
mod position;
mod record;
pub mod rules;
mod types;

pub use action::{Move, MoveRejection};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, TicTacToeInvariants};
pub use position::Position;
pub use record::GameRecord;
pub use rules::{check_draw, check_win, winner};
pub use types::{Board, Mark, Outcome, SIZE, Square};
