//! History consistency: the board holds exactly the marks the history says.

use super::super::{GameRecord, Square};
use super::Invariant;
use std::collections::HashSet;

/// Invariant: one history entry per mark on the board, each at a distinct
/// square holding that entry's mark.
pub struct HistoryConsistentInvariant;

impl Invariant<GameRecord> for HistoryConsistentInvariant {
    fn holds(record: &GameRecord) -> bool {
        let history = record.history();
        let board = record.board();

        let distinct: HashSet<_> = history.iter().map(|mv| mv.position).collect();
        if distinct.len() != history.len() || board.mark_count() != history.len() {
            return false;
        }

        history
            .iter()
            .all(|mv| board.square(mv.position) == Square::Occupied(mv.mark))
    }

    fn description() -> &'static str {
        "Board marks match move history one-to-one"
    }
}
