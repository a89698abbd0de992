//! Error types for board authority operations.

use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// Category of a failed board operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum BoardErrorKind {
    /// A precondition checked locally, before anything reached the network.
    #[display("validation error")]
    Validation,
    /// The round trip failed, timed out, or came back unusable.
    #[display("transport error")]
    Transport,
    /// The authority rejected the submitted column.
    #[display("invalid move")]
    InvalidMove,
    /// The authority rejected the operation itself (e.g. nothing to undo).
    #[display("invalid operation")]
    InvalidOperation,
}

/// Board operation error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{}: {} at {}:{}", kind, message, file, line)]
pub struct BoardError {
    /// What went wrong.
    pub kind: BoardErrorKind,
    /// Human-readable detail, suitable for a notification.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardError {
    /// Creates a new board error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: BoardErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        warn!(%kind, error_message = %message, "Board error created");
        Self {
            kind,
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`BoardErrorKind::Validation`] error.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(BoardErrorKind::Validation, message)
    }

    /// Shorthand for a [`BoardErrorKind::Transport`] error.
    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(BoardErrorKind::Transport, message)
    }
}

impl From<reqwest::Error> for BoardError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_decode() {
            format!("Malformed response: {}", err)
        } else {
            format!("Request failed: {}", err)
        };
        Self::transport(message)
    }
}
