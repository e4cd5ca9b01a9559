//! Outcome consistency: the recorded outcome agrees with the evaluator.

use super::super::{GameRecord, Outcome};
use super::Invariant;

/// Invariant: `Won(m)` iff `m` owns a line and made the last move, `Draw`
/// iff the board is drawn, `InProgress` otherwise.
pub struct OutcomeConsistentInvariant;

impl Invariant<GameRecord> for OutcomeConsistentInvariant {
    fn holds(record: &GameRecord) -> bool {
        let board = record.board();
        match record.outcome() {
            Outcome::Won(mark) => {
                board.check_win(mark)
                    && !board.check_win(mark.opponent())
                    && record.history().last().map(|mv| mv.mark) == Some(mark)
            }
            Outcome::Draw => board.check_draw(),
            Outcome::InProgress => board.winner().is_none() && !board.is_full(),
        }
    }

    fn description() -> &'static str {
        "Outcome matches win/draw evaluation of the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Move, Position};

    #[test]
    fn test_draw_outcome_holds() {
        // X O X / X O O / O X X
        let moves = [
            Move::new(Mark::X, Position::TopLeft),
            Move::new(Mark::O, Position::TopCenter),
            Move::new(Mark::X, Position::TopRight),
            Move::new(Mark::O, Position::Center),
            Move::new(Mark::X, Position::MiddleLeft),
            Move::new(Mark::O, Position::MiddleRight),
            Move::new(Mark::X, Position::BottomCenter),
            Move::new(Mark::O, Position::BottomLeft),
            Move::new(Mark::X, Position::BottomRight),
        ];
        let record = GameRecord::replay(Mark::X, &moves).expect("valid replay");
        assert_eq!(record.outcome(), Outcome::Draw);
        assert!(OutcomeConsistentInvariant::holds(&record));
    }
}
