//! Player actors: one thread per mark, looping against a shared session.

use crate::session::GameSession;
use crate::strategy::{Strategy, StrategyKind};
use derive_getters::Getters;
use serde::Serialize;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, instrument, trace};
use turnstile_tictactoe::{Mark, MoveRejection};

/// Pause after each accepted move.
pub const DEFAULT_MOVE_DELAY: Duration = Duration::from_millis(100);

/// What a player did over one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct PlayerReport {
    /// The player's mark.
    mark: Mark,
    /// Strategy the player used.
    strategy: StrategyKind,
    /// Moves the session accepted.
    accepted: usize,
    /// Candidates refused as occupied or off the board.
    rejected: usize,
}

/// A mark bound to a strategy, playing against a shared session.
pub struct Player {
    session: Arc<GameSession>,
    mark: Mark,
    strategy: Box<dyn Strategy>,
    move_delay: Duration,
}

impl Player {
    /// Creates a player for `mark` using `strategy`.
    pub fn new(session: Arc<GameSession>, mark: Mark, strategy: Box<dyn Strategy>) -> Self {
        Self {
            session,
            mark,
            strategy,
            move_delay: DEFAULT_MOVE_DELAY,
        }
    }

    /// Sets the pause after each accepted move.
    pub fn with_move_delay(mut self, move_delay: Duration) -> Self {
        self.move_delay = move_delay;
        self
    }

    /// The player's mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Plays until the session reports the game is over.
    ///
    /// Each round takes a board snapshot, asks the strategy for a square and
    /// submits it. Waiting for the opponent happens inside the session; a
    /// refused square is retried straight away with a fresh snapshot.
    #[instrument(skip(self), fields(mark = %self.mark, strategy = %self.strategy.kind()))]
    pub fn play(mut self) -> PlayerReport {
        let mut accepted = 0;
        let mut rejected = 0;

        while !self.session.is_over() {
            let board = self.session.board();
            let Some(pos) = self.strategy.select(&board) else {
                thread::yield_now();
                continue;
            };

            match self.session.try_move(self.mark, pos.row(), pos.col()) {
                Ok(mv) => {
                    accepted += 1;
                    debug!(%mv, "Played");
                    if !self.move_delay.is_zero() {
                        thread::sleep(self.move_delay);
                    }
                }
                Err(MoveRejection::GameOver) => break,
                Err(rejection) => {
                    rejected += 1;
                    trace!(%rejection, "Retrying");
                }
            }
        }

        let report = PlayerReport {
            mark: self.mark,
            strategy: self.strategy.kind(),
            accepted,
            rejected,
        };
        info!(accepted, rejected, "Player finished");
        report
    }

    /// Runs [`play`](Self::play) on a new named thread.
    pub fn spawn(self) -> io::Result<JoinHandle<PlayerReport>> {
        thread::Builder::new()
            .name(format!("player-{}", self.mark.to_string().to_lowercase()))
            .spawn(move || self.play())
    }

    /// Like [`spawn`](Self::spawn), but the thread only starts playing once
    /// `start` receives. If the sender is dropped first, the thread exits
    /// with `None` without touching the session.
    pub fn spawn_on_signal(
        self,
        start: Receiver<()>,
    ) -> io::Result<JoinHandle<Option<PlayerReport>>> {
        let mark = self.mark;
        thread::Builder::new()
            .name(format!("player-{}", mark.to_string().to_lowercase()))
            .spawn(move || match start.recv() {
                Ok(()) => Some(self.play()),
                Err(_) => {
                    debug!(%mark, "Start signal dropped; not playing");
                    None
                }
            })
    }
}
