//! Board snapshots as received from the board authority.
//!
//! A snapshot is the authority's full board state. It is decoded once,
//! shape-checked, and then only ever replaced, never edited.

use derive_more::Display;
use serde::{Deserialize, Deserializer};
use tracing::{debug, instrument, warn};

use crate::error::BoardError;

/// One of the two players.
///
/// The authority encodes player 1 as `1` and player 2 as `-1` in the turn
/// field, and has been seen using `2` as well. Both decode to [`Player::Two`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Deserialize)]
#[serde(try_from = "i64")]
pub enum Player {
    /// Moves first.
    #[default]
    #[display("Player 1 (Red)")]
    One,
    /// Moves second.
    #[display("Player 2 (Yellow)")]
    Two,
}

impl Player {
    /// Decodes a wire player code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::One),
            -1 | 2 => Some(Self::Two),
            _ => None,
        }
    }
}

impl TryFrom<i64> for Player {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown player code {}", code))
    }
}

/// What occupies a cell, derived from the authority's raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    /// No token.
    #[default]
    Empty,
    /// Player 1's token (`+` on the wire).
    PlayerOne,
    /// Player 2's token (`-` on the wire).
    PlayerTwo,
}

impl Mark {
    /// Maps a raw cell token. Unknown tokens read as empty.
    pub fn from_token(token: &str) -> Self {
        match token {
            "+" => Self::PlayerOne,
            "-" => Self::PlayerTwo,
            _ => Self::Empty,
        }
    }

    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::PlayerOne => Some(Player::One),
            Self::PlayerTwo => Some(Player::Two),
        }
    }

    /// Plain-text symbol, matching the authority's own tokens.
    pub fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::PlayerOne => '+',
            Self::PlayerTwo => '-',
        }
    }
}

/// Full authoritative board state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardSnapshot {
    height: usize,
    width: usize,
    #[serde(default)]
    win: Option<usize>,
    board: Vec<Vec<String>>,
    row_indices: Vec<i64>,
    player: Player,
    #[serde(default)]
    game_over: bool,
    #[serde(default, deserialize_with = "deserialize_winner")]
    winner: Option<Player>,
}

/// `0`, `null`, and a missing field all mean "no winner".
fn deserialize_winner<'de, D>(deserializer: D) -> Result<Option<Player>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i64>::deserialize(deserializer)? {
        None | Some(0) => Ok(None),
        Some(code) => Player::from_code(code)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown winner code {}", code))),
    }
}

impl BoardSnapshot {
    /// Checks that the grid and column indices agree with the dimensions.
    ///
    /// The authority is trusted for game rules but not for shape; a snapshot
    /// that fails here is treated as a malformed response.
    #[instrument(skip(self), fields(height = self.height, width = self.width))]
    pub fn checked(self) -> Result<Self, BoardError> {
        if self.height == 0 || self.width == 0 {
            return Err(BoardError::transport(format!(
                "Malformed board: dimensions {}x{}",
                self.height, self.width
            )));
        }
        if self.board.len() != self.height {
            warn!(rows = self.board.len(), "Row count mismatch");
            return Err(BoardError::transport(format!(
                "Malformed board: expected {} rows, got {}",
                self.height,
                self.board.len()
            )));
        }
        if let Some((row, cells)) = self
            .board
            .iter()
            .enumerate()
            .find(|(_, cells)| cells.len() != self.width)
        {
            warn!(row, cells = cells.len(), "Column count mismatch");
            return Err(BoardError::transport(format!(
                "Malformed board: row {} has {} cells, expected {}",
                row,
                cells.len(),
                self.width
            )));
        }
        if self.row_indices.len() != self.width {
            return Err(BoardError::transport(format!(
                "Malformed board: expected {} row indices, got {}",
                self.width,
                self.row_indices.len()
            )));
        }
        debug!("Snapshot shape verified");
        Ok(self)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Tokens in a row needed to win, when the authority reports it.
    pub fn win(&self) -> Option<usize> {
        self.win
    }

    /// Raw cell tokens, top row first.
    pub fn board(&self) -> &[Vec<String>] {
        &self.board
    }

    /// Landing row per column; negative when the column is full.
    pub fn row_indices(&self) -> &[i64] {
        &self.row_indices
    }

    /// Whose turn it is.
    pub fn player(&self) -> Player {
        self.player
    }

    /// The authority's termination flag.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// The authority's winner; only meaningful when [`Self::game_over`] is set.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Cell contents at `(row, column)`, empty when out of range.
    pub fn mark(&self, row: usize, column: usize) -> Mark {
        self.board
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or(Mark::Empty, |token| Mark::from_token(token))
    }

    /// Row where the next token in `column` would land.
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        self.row_indices
            .get(column)
            .and_then(|&row| usize::try_from(row).ok())
    }

    /// Whether `column` can take another token.
    pub fn is_column_open(&self, column: usize) -> bool {
        self.landing_row(column).is_some()
    }

    /// Whether every column is full.
    pub fn is_full(&self) -> bool {
        self.row_indices.iter().all(|&row| row < 0)
    }
}
