//! Game session shared by both player threads.
//!
//! The session owns a [`GameRecord`] behind a mutex and a condition variable
//! signalled after every accepted move. A caller moving out of turn is parked
//! on the condition until its turn comes or the game ends; every wakeup
//! re-checks that predicate.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument};
use turnstile_tictactoe::{
    Board, GameRecord, InvariantSet, Mark, Move, MoveRejection, Outcome, TicTacToeInvariants,
};

/// Receives every accepted move while the session lock is still held, so
/// observations arrive in the same total order as the moves themselves.
pub trait MoveObserver: Send + Sync {
    /// Called once per accepted move with the board and outcome after it.
    fn on_move(&self, mv: &Move, board: &Board, outcome: Outcome);
}

impl<T: MoveObserver + ?Sized> MoveObserver for Arc<T> {
    fn on_move(&self, mv: &Move, board: &Board, outcome: Outcome) {
        (**self).on_move(mv, board, outcome)
    }
}

impl<T: MoveObserver + ?Sized> MoveObserver for Box<T> {
    fn on_move(&self, mv: &Move, board: &Board, outcome: Outcome) {
        (**self).on_move(mv, board, outcome)
    }
}

/// One game of tic-tac-toe played by two concurrent callers.
pub struct GameSession {
    state: Mutex<GameRecord>,
    turn_changed: Condvar,
    observer: Option<Box<dyn MoveObserver>>,
}

impl GameSession {
    /// Creates a session where X moves first.
    pub fn new() -> Self {
        Self::starting_with(Mark::X)
    }

    /// Creates a session where `first` moves first.
    #[instrument]
    pub fn starting_with(first: Mark) -> Self {
        info!(%first, "Creating game session");
        Self {
            state: Mutex::new(GameRecord::new(first)),
            turn_changed: Condvar::new(),
            observer: None,
        }
    }

    /// Attaches an observer notified of every accepted move.
    pub fn with_observer(mut self, observer: impl MoveObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    // Mutation only happens after validation and cannot unwind halfway,
    // so the record behind a poisoned lock is still consistent.
    fn lock(&self) -> MutexGuard<'_, GameRecord> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Places `mark` at `row, col`, waiting for `mark`'s turn first.
    ///
    /// Returns `true` if the move was applied. Returns `false` without
    /// changing anything when the game is over, or when the square is off
    /// the board or occupied; in the latter two cases the turn stays with
    /// the caller.
    pub fn attempt_move(&self, mark: Mark, row: usize, col: usize) -> bool {
        self.try_move(mark, row, col).is_ok()
    }

    /// Same as [`attempt_move`](Self::attempt_move), reporting why a move
    /// was refused.
    ///
    /// Blocks while it is the other mark's turn and the game is running.
    /// Never returns [`MoveRejection::WrongTurn`].
    #[instrument(skip(self))]
    pub fn try_move(&self, mark: Mark, row: usize, col: usize) -> Result<Move, MoveRejection> {
        let guard = self.lock();
        if guard.turn() != mark && !guard.is_over() {
            debug!(turn = %guard.turn(), "Waiting for turn");
        }

        let mut record = self
            .turn_changed
            .wait_while(guard, |record| record.turn() != mark && !record.is_over())
            .unwrap_or_else(PoisonError::into_inner);

        let mv = match record.apply(mark, row, col) {
            Ok(mv) => mv,
            Err(rejection) => {
                debug!(%rejection, "Move rejected");
                return Err(rejection);
            }
        };

        // Waiters wake only once the lock is released, which also happens
        // on unwind if the checks or the observer below panic.
        self.turn_changed.notify_all();

        debug_assert_eq!(
            TicTacToeInvariants::check_all(&*record),
            Ok(()),
            "game invariants violated after {}",
            mv
        );

        let outcome = record.outcome();
        if let Some(observer) = &self.observer {
            observer.on_move(&mv, record.board(), outcome);
        }

        if outcome.is_terminal() {
            info!(%mv, %outcome, "Game over");
        } else {
            info!(%mv, next = %record.turn(), "Move accepted");
        }

        Ok(mv)
    }

    /// True once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        self.lock().is_over()
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        self.lock().outcome()
    }

    /// Mark whose move is accepted next.
    pub fn turn(&self) -> Mark {
        self.lock().turn()
    }

    /// Copy of the current board.
    pub fn board(&self) -> Board {
        self.lock().board().clone()
    }

    /// Accepted moves so far, in order.
    pub fn history(&self) -> Vec<Move> {
        self.lock().history().to_vec()
    }

    /// Consistent copy of the whole game state.
    pub fn snapshot(&self) -> GameRecord {
        self.lock().clone()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &*self.lock())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnstile_tictactoe::Position;

    #[test]
    fn test_own_turn_does_not_block() {
        let session = GameSession::new();
        assert!(session.attempt_move(Mark::X, 1, 1));
        assert_eq!(session.turn(), Mark::O);
        assert!(session.attempt_move(Mark::O, 0, 0));
        assert_eq!(session.turn(), Mark::X);
    }

    #[test]
    fn test_occupied_square_keeps_turn() {
        let session = GameSession::new();
        assert!(session.attempt_move(Mark::X, 0, 0));
        assert!(!session.attempt_move(Mark::O, 0, 0));
        assert_eq!(session.turn(), Mark::O);
        assert!(session.attempt_move(Mark::O, 0, 1));
    }

    #[test]
    fn test_rejection_reasons() {
        let session = GameSession::new();
        session.attempt_move(Mark::X, 2, 2);
        assert_eq!(
            session.try_move(Mark::O, 2, 2),
            Err(MoveRejection::Occupied(Position::BottomRight))
        );
        assert_eq!(
            session.try_move(Mark::O, 0, 7),
            Err(MoveRejection::OutOfRange { row: 0, col: 7 })
        );
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_snapshot_matches_accessors() {
        let session = GameSession::starting_with(Mark::O);
        session.attempt_move(Mark::O, 1, 0);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.board(), &session.board());
        assert_eq!(snapshot.turn(), session.turn());
        assert_eq!(snapshot.outcome(), session.outcome());
        assert_eq!(snapshot.history(), session.history().as_slice());
    }
}
