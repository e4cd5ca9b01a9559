//! Runs one game: two player threads against one session.

use crate::config::MatchConfig;
use crate::player::{Player, PlayerReport};
use crate::session::{GameSession, MoveObserver};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::Serialize;
use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;
use tracing::{error, info, instrument};
use turnstile_tictactoe::{Board, Mark, Move, Outcome};

/// Final state of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct MatchReport {
    /// How the game ended.
    outcome: Outcome,
    /// The final board.
    board: Board,
    /// Accepted moves in order.
    history: Vec<Move>,
    /// Per-player summaries, X first.
    players: Vec<PlayerReport>,
}

/// Two players bound to one session.
pub struct Match {
    session: Arc<GameSession>,
    player_x: Player,
    player_o: Player,
}

impl Match {
    /// Creates a match from already-built players.
    pub fn new(session: Arc<GameSession>, player_x: Player, player_o: Player) -> Self {
        Self {
            session,
            player_x,
            player_o,
        }
    }

    /// Builds the session and both players from configuration.
    #[instrument(skip(observer))]
    pub fn from_config(config: &MatchConfig, observer: Option<Box<dyn MoveObserver>>) -> Self {
        let mut session = GameSession::starting_with(*config.first());
        if let Some(observer) = observer {
            session = session.with_observer(observer);
        }
        let session = Arc::new(session);

        let build = |mark: Mark| {
            let player_config = config.player(mark);
            let strategy = player_config.strategy().build(*player_config.seed());
            Player::new(Arc::clone(&session), mark, strategy).with_move_delay(config.move_delay())
        };
        let player_x = build(Mark::X);
        let player_o = build(Mark::O);

        Self::new(session, player_x, player_o)
    }

    /// The shared session.
    pub fn session(&self) -> &Arc<GameSession> {
        &self.session
    }

    /// Starts both players, waits for both, and reports the result.
    #[instrument(skip(self))]
    pub fn run(self) -> Result<MatchReport, MatchError> {
        info!("Starting match");
        // Neither player moves until both threads exist, so a failed spawn
        // never leaves the other one parked on the session.
        let (start_x, wait_x) = mpsc::channel();
        let (start_o, wait_o) = mpsc::channel();
        let x = self.player_x.spawn_on_signal(wait_x)?;
        let o = match self.player_o.spawn_on_signal(wait_o) {
            Ok(handle) => handle,
            Err(e) => {
                error!(error = %e, "Failed to start player O");
                drop(start_x);
                let _ = x.join();
                return Err(e.into());
            }
        };
        // A send only fails if the thread already died; join reports that.
        let _ = start_x.send(());
        let _ = start_o.send(());

        let x = join(x, Mark::X);
        let o = join(o, Mark::O);
        let players = vec![x?, o?];

        let record = self.session.snapshot();
        info!(outcome = %record.outcome(), moves = record.history().len(), "Match finished");
        Ok(MatchReport {
            outcome: record.outcome(),
            board: record.board().clone(),
            history: record.history().to_vec(),
            players,
        })
    }
}

fn join(handle: JoinHandle<Option<PlayerReport>>, mark: Mark) -> Result<PlayerReport, MatchError> {
    match handle.join() {
        Ok(Some(report)) => Ok(report),
        Ok(None) => Err(MatchError::new(format!("Player {} never started", mark))),
        Err(_) => {
            error!(%mark, "Player thread panicked");
            Err(MatchError::new(format!("Player {} panicked", mark)))
        }
    }
}

/// Failure to run a match: a player thread could not start or panicked.
#[derive(Debug, Clone, Display, Error)]
#[display("Match error: {} at {}:{}", message, file, line)]
pub struct MatchError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl MatchError {
    /// Creates a new match error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for MatchError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Failed to start player thread: {}", err))
    }
}
