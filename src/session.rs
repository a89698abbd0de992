//! Locally held mirror of the authority's board.

use tracing::{debug, info, instrument};

use crate::snapshot::{BoardSnapshot, Player};
use crate::termination::{self, Termination};

/// Named states of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SessionPhase {
    /// No snapshot received yet.
    #[display("uninitialized")]
    Uninitialized,
    /// Moves are accepted.
    #[display("playing")]
    Playing,
    /// Moves are refused until a reset, new game, or undo.
    #[display("game over")]
    GameOver,
}

/// Which kind of operation produced a snapshot.
///
/// Restart-style operations (reset, new game, undo) always resume play, so
/// their snapshots never carry termination forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotOrigin {
    /// Plain read of the current board. Only the first one takes the
    /// authority's termination flags as given.
    Load,
    /// Result of a submitted move.
    Move,
    /// Result of reset, new game, or undo.
    Restart,
}

/// The session's mirror of the latest snapshot and what follows from it.
///
/// Only [`SessionState::replace`] changes anything, and it changes
/// everything at once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    board: Option<BoardSnapshot>,
    termination: Termination,
    current_player: Player,
}

impl SessionState {
    /// Creates an uninitialized session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest snapshot, if any.
    pub fn board(&self) -> Option<&BoardSnapshot> {
        self.board.as_ref()
    }

    /// Termination derived from the latest snapshot.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Whether the session refuses further moves.
    pub fn game_over(&self) -> bool {
        self.termination.over
    }

    /// Whose turn it is, for display.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Current named state.
    pub fn phase(&self) -> SessionPhase {
        match (&self.board, self.termination.over) {
            (None, _) => SessionPhase::Uninitialized,
            (Some(_), false) => SessionPhase::Playing,
            (Some(_), true) => SessionPhase::GameOver,
        }
    }

    /// Replaces the snapshot and every derived field with it.
    #[instrument(skip(self, snapshot), fields(player = ?snapshot.player()))]
    pub(crate) fn replace(&mut self, snapshot: BoardSnapshot, origin: SnapshotOrigin) -> SessionPhase {
        let termination = match origin {
            SnapshotOrigin::Restart => Termination::in_progress(),
            SnapshotOrigin::Move => termination::detect(&snapshot),
            // The authority's flags outlive reset and undo, so only the first
            // load trusts them.
            SnapshotOrigin::Load if self.board.is_none() => termination::detect(&snapshot),
            SnapshotOrigin::Load if self.termination.over => self.termination,
            SnapshotOrigin::Load => termination::detect_full_board(&snapshot),
        };
        debug!(?origin, ?termination, "Replacing session snapshot");

        self.current_player = snapshot.player();
        self.termination = termination;
        self.board = Some(snapshot);

        let phase = self.phase();
        info!(%phase, "Session state replaced");
        phase
    }
}
