//! Game-over detection over a single snapshot.

use derive_new::new;
use tracing::{debug, instrument};

use crate::snapshot::{BoardSnapshot, Player};

/// How a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// Still being played.
    #[default]
    Undecided,
    /// Ended without a winner.
    Tie,
    /// Ended with a winner.
    Won(Player),
}

/// Termination status derived from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, new)]
pub struct Termination {
    /// Whether interaction should stop.
    pub over: bool,
    /// Who won, if anyone.
    pub outcome: Outcome,
}

impl Termination {
    /// A game still in progress.
    pub fn in_progress() -> Self {
        Self::default()
    }

    /// The winning player, if the game ended with one.
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::Won(player) => Some(player),
            Outcome::Undecided | Outcome::Tie => None,
        }
    }
}

/// Derives termination from a snapshot.
///
/// An authoritative `game_over` is trusted as given, with a missing winner
/// meaning a tie. Otherwise a board with no open column is a tie even if the
/// authority has not said so yet.
#[instrument(skip(snapshot), fields(game_over = snapshot.game_over(), winner = ?snapshot.winner()))]
pub fn detect(snapshot: &BoardSnapshot) -> Termination {
    let termination = if snapshot.game_over() {
        let outcome = snapshot.winner().map_or(Outcome::Tie, Outcome::Won);
        Termination::new(true, outcome)
    } else {
        detect_full_board(snapshot)
    };
    debug!(?termination, "Termination detected");
    termination
}

/// Ignores the authority's flags and only checks for a full board.
pub fn detect_full_board(snapshot: &BoardSnapshot) -> Termination {
    if snapshot.is_full() {
        debug!("Board full without authoritative game over, treating as tie");
        Termination::new(true, Outcome::Tie)
    } else {
        Termination::in_progress()
    }
}
