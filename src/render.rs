//! Projection of session state into what a presentation layer draws.
//!
//! Nothing here touches the network or mutates state, so a render model can
//! be rebuilt at any time from a [`SessionState`] alone.

use std::fmt;

use tracing::instrument;

use crate::session::SessionState;
use crate::snapshot::{Mark, Player};
use crate::termination::Outcome;

/// Which case the status line describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// No board received yet.
    Waiting,
    /// Game in progress; this player moves next.
    Turn(Player),
    /// Game over with a winner.
    Won(Player),
    /// Game over without a winner.
    Tie,
}

impl StatusKind {
    /// Status text for this case.
    pub fn text(self) -> String {
        match self {
            Self::Waiting => "Waiting for the board server...".to_string(),
            Self::Turn(player) => format!("{}'s turn - pick a column or ask the AI", player),
            Self::Won(player) => format!("{} wins!", player),
            Self::Tie => "Game over - it's a tie!".to_string(),
        }
    }
}

/// Status line: category plus text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Status case.
    pub kind: StatusKind,
    /// Text to display.
    pub text: String,
}

impl From<StatusKind> for StatusLine {
    fn from(kind: StatusKind) -> Self {
        Self {
            kind,
            text: kind.text(),
        }
    }
}

/// Per-column view data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnView {
    /// Column index.
    pub index: usize,
    /// Whether a move here may be submitted right now.
    pub selectable: bool,
    /// Row the next token would land in.
    pub landing_row: Option<usize>,
}

/// Everything needed to draw the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    /// Number of rows.
    pub height: usize,
    /// Number of columns.
    pub width: usize,
    /// Win length, when known.
    pub win: Option<usize>,
    /// Columns, left to right.
    pub columns: Vec<ColumnView>,
    /// Cells, top row first.
    pub cells: Vec<Vec<Mark>>,
    /// Status line.
    pub status: StatusLine,
}

impl RenderModel {
    /// Whether the column at `index` may take a move.
    pub fn is_selectable(&self, index: usize) -> bool {
        self.columns.get(index).is_some_and(|c| c.selectable)
    }
}

/// Builds the render model for `state`.
#[instrument(skip(state), fields(phase = %state.phase()))]
pub fn build(state: &SessionState) -> RenderModel {
    let Some(board) = state.board() else {
        return RenderModel {
            height: 0,
            width: 0,
            win: None,
            columns: Vec::new(),
            cells: Vec::new(),
            status: StatusKind::Waiting.into(),
        };
    };

    let termination = state.termination();
    let columns = (0..board.width())
        .map(|index| {
            let landing_row = board.landing_row(index);
            ColumnView {
                index,
                selectable: !termination.over && board.is_column_open(index),
                landing_row,
            }
        })
        .collect();

    let cells = board
        .board()
        .iter()
        .map(|row| row.iter().map(|token| Mark::from_token(token)).collect())
        .collect();

    let status = if termination.over {
        match termination.outcome {
            Outcome::Won(player) => StatusKind::Won(player),
            Outcome::Tie | Outcome::Undecided => StatusKind::Tie,
        }
    } else {
        StatusKind::Turn(state.current_player())
    };

    RenderModel {
        height: board.height(),
        width: board.width(),
        win: board.win(),
        columns,
        cells,
        status: status.into(),
    }
}

impl fmt::Display for RenderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width > 0 {
            let header: Vec<String> = self.columns.iter().map(|c| c.index.to_string()).collect();
            writeln!(f, "{}", header.join(" "))?;
            writeln!(f, "{}", "=".repeat(self.width * 2 - 1))?;
            for row in &self.cells {
                let line: Vec<String> = row.iter().map(|m| m.symbol().to_string()).collect();
                writeln!(f, "{}", line.join(" "))?;
            }
            writeln!(f, "{}", "=".repeat(self.width * 2 - 1))?;
        }
        write!(f, "{}", self.status.text)
    }
}
