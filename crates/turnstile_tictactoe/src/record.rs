//! Sequential game engine: board, turn, outcome, and history as one value.

use super::{Board, Mark, Move, MoveRejection, Outcome, Position};
use serde::Serialize;
use tracing::{debug, instrument};

/// Complete state of one game.
///
/// Fields are only reachable through accessors; the single mutation path is
/// [`GameRecord::apply`], which validates first and then changes board,
/// turn, outcome, and history together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    board: Board,
    first: Mark,
    turn: Mark,
    outcome: Outcome,
    history: Vec<Move>,
}

impl GameRecord {
    /// Creates an empty game where `first` moves first.
    pub fn new(first: Mark) -> Self {
        Self {
            board: Board::new(),
            first,
            turn: first,
            outcome: Outcome::InProgress,
            history: Vec::new(),
        }
    }

    /// Replays a sequence of moves from an empty board.
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(first: Mark, moves: &[Move]) -> Result<Self, MoveRejection> {
        let mut record = Self::new(first);
        for mv in moves {
            record.apply(mv.mark, mv.position.row(), mv.position.col())?;
        }
        Ok(record)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark that moved first.
    pub fn first(&self) -> Mark {
        self.first
    }

    /// Mark whose move is accepted next. Frozen once the game ends.
    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Accepted moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// True once won or drawn.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Applies a move for `mark` at `row, col`.
    ///
    /// Checks, in order: the game is still running, it is `mark`'s turn, the
    /// coordinates are on the board, the square is empty. A refused move
    /// leaves the record untouched.
    pub fn apply(&mut self, mark: Mark, row: usize, col: usize) -> Result<Move, MoveRejection> {
        if self.is_over() {
            return Err(MoveRejection::GameOver);
        }
        if self.turn != mark {
            return Err(MoveRejection::WrongTurn(mark));
        }
        let position =
            Position::from_coords(row, col).ok_or(MoveRejection::OutOfRange { row, col })?;
        if !self.board.place_at(position, mark) {
            return Err(MoveRejection::Occupied(position));
        }

        let mv = Move::new(mark, position);
        self.history.push(mv);

        if self.board.check_win(mark) {
            self.outcome = Outcome::Won(mark);
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
        } else {
            self.turn = mark.opponent();
        }

        debug!(%mv, outcome = %self.outcome, "Move applied");
        Ok(mv)
    }
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new(Mark::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_flips_after_move() {
        let mut record = GameRecord::new(Mark::X);
        record.apply(Mark::X, 1, 1).expect("valid move");
        assert_eq!(record.turn(), Mark::O);
        assert_eq!(record.history().len(), 1);
    }

    #[test]
    fn test_rejections_leave_record_untouched() {
        let mut record = GameRecord::new(Mark::X);
        record.apply(Mark::X, 0, 0).expect("valid move");
        let before = record.clone();

        assert_eq!(
            record.apply(Mark::O, 0, 0),
            Err(MoveRejection::Occupied(Position::TopLeft))
        );
        assert_eq!(
            record.apply(Mark::O, 5, 1),
            Err(MoveRejection::OutOfRange { row: 5, col: 1 })
        );
        assert_eq!(record.apply(Mark::X, 2, 2), Err(MoveRejection::WrongTurn(Mark::X)));
        assert_eq!(record, before);
    }

    #[test]
    fn test_win_freezes_turn_and_outcome() {
        let moves = [
            Move::new(Mark::X, Position::TopLeft),
            Move::new(Mark::O, Position::MiddleLeft),
            Move::new(Mark::X, Position::TopCenter),
            Move::new(Mark::O, Position::Center),
            Move::new(Mark::X, Position::TopRight),
        ];
        let mut record = GameRecord::replay(Mark::X, &moves).expect("valid replay");
        assert_eq!(record.outcome(), Outcome::Won(Mark::X));
        assert_eq!(record.turn(), Mark::X);
        assert_eq!(record.apply(Mark::X, 2, 2), Err(MoveRejection::GameOver));
        assert_eq!(record.apply(Mark::O, 2, 2), Err(MoveRejection::GameOver));
    }

    #[test]
    fn test_o_can_move_first() {
        let mut record = GameRecord::new(Mark::O);
        assert_eq!(record.apply(Mark::X, 0, 0), Err(MoveRejection::WrongTurn(Mark::X)));
        assert!(record.apply(Mark::O, 0, 0).is_ok());
        assert_eq!(record.turn(), Mark::X);
    }
}
