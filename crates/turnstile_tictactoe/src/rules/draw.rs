//! Draw detection logic for tic-tac-toe.

use super::super::{Board, Mark, Square};
use super::win::check_win;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board on which neither mark owns a line.
#[instrument(skip(board))]
pub fn check_draw(board: &Board) -> bool {
    is_full(board) && !check_win(board, Mark::X) && !check_win(board, Mark::O)
}
