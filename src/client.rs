//! Remote board authority access.
//!
//! [`BoardAuthority`] is the request/response contract with the process that
//! owns the board. [`HttpBoardClient`] speaks it over HTTP/JSON.

use std::time::Duration;

use derive_new::new;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{BoardError, BoardErrorKind};
use crate::snapshot::BoardSnapshot;

/// Dimensions for a new board, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoardDimensions {
    height: usize,
    width: usize,
    win: usize,
}

impl BoardDimensions {
    /// Validates and builds board dimensions.
    ///
    /// The win length must fit in both directions, and nothing may be zero.
    #[track_caller]
    #[instrument]
    pub fn new(height: usize, width: usize, win: usize) -> Result<Self, BoardError> {
        if height == 0 || width == 0 || win == 0 {
            return Err(BoardError::validation(
                "Board height, width, and win length must be positive",
            ));
        }
        if height < win || width < win {
            return Err(BoardError::validation(
                "The number of tokens required to win must not exceed board dimensions",
            ));
        }
        Ok(Self { height, width, win })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Tokens in a row needed to win.
    pub fn win(&self) -> usize {
        self.win
    }
}

/// Request/response contract with the board authority.
///
/// Each method is exactly one round trip.
#[async_trait::async_trait]
pub trait BoardAuthority: Send + Sync {
    /// Fetches the current board.
    async fn load_board(&self) -> Result<BoardSnapshot, BoardError>;

    /// Starts a new board with the given dimensions.
    async fn create_board(&self, dimensions: BoardDimensions) -> Result<BoardSnapshot, BoardError>;

    /// Starts over with the current dimensions.
    async fn reset(&self) -> Result<BoardSnapshot, BoardError>;

    /// Retracts the last move.
    async fn undo_move(&self) -> Result<BoardSnapshot, BoardError>;

    /// Drops a token for the player to move in `column`.
    async fn make_move(&self, column: usize) -> Result<BoardSnapshot, BoardError>;

    /// Asks the authority which column it would play. `None` means no
    /// legal column exists.
    async fn best_move(&self) -> Result<Option<usize>, BoardError>;
}

/// Body of a move request.
#[derive(Debug, Clone, Copy, Serialize, new)]
struct MoveRequest {
    column: usize,
}

/// Body of a non-success response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Board authority reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBoardClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBoardClient {
    /// Creates a client for the authority at `base_url`.
    #[instrument(skip(base_url), fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, BoardError> {
        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            error!(error = %e, "Failed to build HTTP client");
            BoardError::transport(format!("Failed to build HTTP client: {}", e))
        })?;
        info!(base_url = %base_url, "Created board authority client");
        Ok(Self { base_url, client })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Turns a non-success response into an error of the right kind.
    ///
    /// A client-error status means the authority understood and refused,
    /// which maps to `rejection`. Anything else is a transport failure.
    async fn ensure_success(
        response: reqwest::Response,
        rejection: BoardErrorKind,
        fallback: &str,
    ) -> Result<reqwest::Response, BoardError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = detail_message(&body).unwrap_or_else(|| fallback.to_string());
        warn!(status = %status, body = %body, message = %message, "Authority returned failure");

        let kind = if status.is_client_error() && status != StatusCode::NOT_FOUND {
            rejection
        } else {
            BoardErrorKind::Transport
        };
        Err(BoardError::new(kind, message))
    }

    async fn read_snapshot(response: reqwest::Response) -> Result<BoardSnapshot, BoardError> {
        let snapshot: BoardSnapshot = response.json().await?;
        let snapshot = snapshot.checked()?;
        debug!(
            height = snapshot.height(),
            width = snapshot.width(),
            player = ?snapshot.player(),
            game_over = snapshot.game_over(),
            "Received board snapshot"
        );
        Ok(snapshot)
    }
}

/// Extracts the `detail` field from an error body.
fn detail_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) if !text.is_empty() => Some(text),
        serde_json::Value::String(_) | serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[async_trait::async_trait]
impl BoardAuthority for HttpBoardClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn load_board(&self) -> Result<BoardSnapshot, BoardError> {
        debug!("Loading board");
        let response = self.client.get(self.url("get_board")).send().await?;
        let response =
            Self::ensure_success(response, BoardErrorKind::Transport, "Failed to load board").await?;
        Self::read_snapshot(response).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn create_board(&self, dimensions: BoardDimensions) -> Result<BoardSnapshot, BoardError> {
        info!("Creating board");
        let response = self
            .client
            .post(self.url("create_board"))
            .json(&dimensions)
            .send()
            .await?;
        let response =
            Self::ensure_success(response, BoardErrorKind::Validation, "Failed to create board").await?;
        Self::read_snapshot(response).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn reset(&self) -> Result<BoardSnapshot, BoardError> {
        info!("Resetting game");
        let response = self.client.post(self.url("reset")).send().await?;
        let response =
            Self::ensure_success(response, BoardErrorKind::Transport, "Failed to reset game").await?;
        Self::read_snapshot(response).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn undo_move(&self) -> Result<BoardSnapshot, BoardError> {
        info!("Undoing move");
        let response = self.client.post(self.url("undo_move")).send().await?;
        let response =
            Self::ensure_success(response, BoardErrorKind::InvalidOperation, "Failed to undo move")
                .await?;
        Self::read_snapshot(response).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn make_move(&self, column: usize) -> Result<BoardSnapshot, BoardError> {
        info!(column, "Submitting move");
        let response = self
            .client
            .post(self.url("make_move"))
            .json(&MoveRequest::new(column))
            .send()
            .await?;
        let response =
            Self::ensure_success(response, BoardErrorKind::InvalidMove, "Invalid move").await?;
        Self::read_snapshot(response).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn best_move(&self) -> Result<Option<usize>, BoardError> {
        debug!("Requesting AI move");
        let response = self.client.get(self.url("get_best_move")).send().await?;
        let response =
            Self::ensure_success(response, BoardErrorKind::Transport, "Failed to get AI move").await?;
        let column: Option<i64> = response.json().await?;
        let column = column
            .map(|c| {
                usize::try_from(c)
                    .map_err(|_| BoardError::transport(format!("Malformed AI move: column {}", c)))
            })
            .transpose()?;
        info!(?column, "AI move received");
        Ok(column)
    }
}
