//! Session controller: the state machine between intents and the authority.
//!
//! The controller is the only writer of [`SessionState`]. Every operation is
//! one authority round trip; on success the snapshot replaces the session
//! state wholesale, on failure the state is left as it was and an error
//! notification is posted instead.

use tracing::{debug, info, instrument, warn};

use crate::client::{BoardAuthority, BoardDimensions};
use crate::error::{BoardError, BoardErrorKind};
use crate::notify::Notifications;
use crate::render::{self, RenderModel};
use crate::session::{SessionPhase, SessionState, SnapshotOrigin};
use crate::snapshot::BoardSnapshot;

/// A user or automated request the presentation layer can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Start a board with new dimensions.
    NewGame {
        /// Number of rows.
        height: usize,
        /// Number of columns.
        width: usize,
        /// Tokens in a row needed to win.
        win: usize,
    },
    /// Start over with the current dimensions.
    Reset,
    /// Retract the last move.
    Undo,
    /// Drop a token in a column.
    Move(usize),
    /// Let the authority pick and play a column.
    AiMove,
    /// Re-read the current board.
    Refresh,
}

/// What became of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentOutcome {
    /// A new snapshot was applied; the session is now in this phase.
    Applied(SessionPhase),
    /// The operation failed; state is unchanged.
    Rejected(BoardErrorKind),
    /// Refused locally because the session is over or not loaded yet.
    Ignored,
    /// The authority reported no legal column.
    NoMoveAvailable,
}

/// Drives a session against a board authority.
#[derive(Debug)]
pub struct SessionController<A> {
    authority: A,
    state: SessionState,
    notifications: Notifications,
}

impl<A: BoardAuthority> SessionController<A> {
    /// Creates a controller with an uninitialized session.
    #[instrument(skip_all)]
    pub fn new(authority: A, notifications: Notifications) -> Self {
        info!("Creating session controller");
        Self {
            authority,
            state: SessionState::new(),
            notifications,
        }
    }

    /// Current session state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current named state.
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Notification slots.
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Mutable notification slots, for expiring stale messages.
    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// The authority this controller talks to.
    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Render model for the current state.
    pub fn render(&self) -> RenderModel {
        render::build(&self.state)
    }

    /// Routes an intent to its operation.
    #[instrument(skip(self))]
    pub async fn dispatch(&mut self, intent: Intent) -> IntentOutcome {
        match intent {
            Intent::NewGame { height, width, win } => self.new_game(height, width, win).await,
            Intent::Reset => self.reset().await,
            Intent::Undo => self.undo().await,
            Intent::Move(column) => self.make_move(column).await,
            Intent::AiMove => self.ai_move().await,
            Intent::Refresh => self.load_board().await,
        }
    }

    /// Reads the current board from the authority.
    #[instrument(skip(self))]
    pub async fn load_board(&mut self) -> IntentOutcome {
        let result = self.authority.load_board().await;
        self.settle(result, SnapshotOrigin::Load, "Failed to initialize game", None)
    }

    /// Starts a board with new dimensions.
    ///
    /// Dimensions are checked before anything is sent.
    #[instrument(skip(self))]
    pub async fn new_game(&mut self, height: usize, width: usize, win: usize) -> IntentOutcome {
        let dimensions = match BoardDimensions::new(height, width, win) {
            Ok(dimensions) => dimensions,
            Err(e) => {
                warn!(error = %e, "New game rejected locally");
                self.notifications.error(e.message);
                return IntentOutcome::Rejected(BoardErrorKind::Validation);
            }
        };
        let result = self.authority.create_board(dimensions).await;
        self.settle(
            result,
            SnapshotOrigin::Restart,
            "Failed to create new board",
            Some("New game created successfully!"),
        )
    }

    /// Starts over with the current dimensions.
    #[instrument(skip(self))]
    pub async fn reset(&mut self) -> IntentOutcome {
        let result = self.authority.reset().await;
        self.settle(
            result,
            SnapshotOrigin::Restart,
            "Failed to reset game",
            Some("Game reset successfully!"),
        )
    }

    /// Retracts the last move. Always resumes play on success.
    #[instrument(skip(self))]
    pub async fn undo(&mut self) -> IntentOutcome {
        let result = self.authority.undo_move().await;
        self.settle(result, SnapshotOrigin::Restart, "Failed to undo move", Some("Move undone!"))
    }

    /// Submits a move in `column`.
    #[instrument(skip(self))]
    pub async fn make_move(&mut self, column: usize) -> IntentOutcome {
        if self.phase() != SessionPhase::Playing {
            debug!(phase = %self.phase(), "Move ignored");
            return IntentOutcome::Ignored;
        }
        let result = self.authority.make_move(column).await;
        let outcome = self.settle(result, SnapshotOrigin::Move, "Failed to make move", None);
        if outcome == IntentOutcome::Applied(SessionPhase::GameOver) {
            info!(termination = ?self.state.termination(), "Game over");
        }
        outcome
    }

    /// Asks the authority for a column and plays it.
    #[instrument(skip(self))]
    pub async fn ai_move(&mut self) -> IntentOutcome {
        if self.phase() != SessionPhase::Playing {
            debug!(phase = %self.phase(), "AI move ignored");
            return IntentOutcome::Ignored;
        }
        match self.authority.best_move().await {
            Ok(Some(column)) => {
                info!(column, "Playing AI move");
                self.make_move(column).await
            }
            Ok(None) => {
                info!("Authority reports no legal column");
                self.notifications.error("No valid moves available");
                IntentOutcome::NoMoveAvailable
            }
            Err(e) => {
                warn!(error = %e, "AI move request failed");
                self.notifications
                    .error(format!("Failed to get AI move: {}", e.message));
                IntentOutcome::Rejected(e.kind)
            }
        }
    }

    /// Applies a successful result or reports a failed one.
    fn settle(
        &mut self,
        result: Result<BoardSnapshot, BoardError>,
        origin: SnapshotOrigin,
        failure_prefix: &str,
        success_message: Option<&str>,
    ) -> IntentOutcome {
        match result {
            Ok(snapshot) => {
                let phase = self.state.replace(snapshot, origin);
                if let Some(message) = success_message {
                    self.notifications.success(message);
                }
                IntentOutcome::Applied(phase)
            }
            Err(e) => {
                warn!(error = %e, "Operation failed, session unchanged");
                self.notifications
                    .error(format!("{}: {}", failure_prefix, e.message));
                IntentOutcome::Rejected(e.kind)
            }
        }
    }
}
