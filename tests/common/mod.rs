//! Shared test fixtures: a rule-keeping fake board authority.
//!
//! `FakeBoard` mirrors how the real authority behaves, including its quirks:
//! `game_over`/`winner` only appear once a move has been made and are not
//! cleared by undo or reset, and ties are reported as winner `0`.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use connect_four_client::{
    BoardAuthority, BoardDimensions, BoardError, BoardErrorKind, BoardSnapshot,
};
use serde::Deserialize;
use serde_json::{Value, json};

/// In-memory board with Connect Four rules.
#[derive(Debug, Clone)]
pub struct FakeBoard {
    height: usize,
    width: usize,
    win: usize,
    board: Vec<Vec<String>>,
    row_indices: Vec<i64>,
    history: Vec<(Vec<Vec<String>>, Vec<i64>, i64)>,
    player: i64,
    game_over: Option<bool>,
    winner: Option<i64>,
    /// When false, a full board is not flagged as game over.
    pub report_ties: bool,
}

impl FakeBoard {
    pub fn new(height: usize, width: usize, win: usize) -> Self {
        Self {
            height,
            width,
            win,
            board: vec![vec![".".to_string(); width]; height],
            row_indices: vec![height as i64 - 1; width],
            history: Vec::new(),
            player: 1,
            game_over: None,
            winner: None,
            report_ties: true,
        }
    }

    pub fn snapshot_json(&self) -> Value {
        let mut value = json!({
            "height": self.height,
            "width": self.width,
            "win": self.win,
            "board": self.board,
            "row_indices": self.row_indices,
            "history": self.history.len(),
            "player": self.player,
        });
        if let Some(game_over) = self.game_over {
            value["game_over"] = json!(game_over);
            value["winner"] = json!(self.winner);
        }
        value
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        serde_json::from_value(self.snapshot_json()).expect("fake snapshot decodes")
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        column < self.width && self.row_indices[column] >= 0
    }

    pub fn is_full(&self) -> bool {
        self.row_indices.iter().all(|&r| r < 0)
    }

    pub fn make_move(&mut self, column: usize) -> Result<(), String> {
        if !self.is_valid_move(column) {
            return Err("Invalid move".to_string());
        }
        self.history
            .push((self.board.clone(), self.row_indices.clone(), self.player));

        let row = self.row_indices[column] as usize;
        let token = if self.player == 1 { "+" } else { "-" };
        self.board[row][column] = token.to_string();
        self.row_indices[column] -= 1;

        let result = if self.wins_from(row, column) {
            Some(self.player)
        } else if self.is_full() {
            Some(0)
        } else {
            self.player = -self.player;
            None
        };

        match result {
            Some(0) if !self.report_ties => {
                self.game_over = Some(false);
                self.winner = None;
            }
            Some(code) => {
                self.game_over = Some(true);
                self.winner = Some(code);
            }
            None => {
                self.game_over = Some(false);
                self.winner = None;
            }
        }
        Ok(())
    }

    fn wins_from(&self, row: usize, column: usize) -> bool {
        let token = &self.board[row][column];
        let (h, w) = (self.height as i64, self.width as i64);
        [(0i64, 1i64), (1, 0), (1, 1), (1, -1)].iter().any(|&(dr, dc)| {
            let mut count = 1;
            for sign in [1, -1] {
                let (mut r, mut c) = (row as i64 + sign * dr, column as i64 + sign * dc);
                while r >= 0 && r < h && c >= 0 && c < w && &self.board[r as usize][c as usize] == token {
                    count += 1;
                    r += sign * dr;
                    c += sign * dc;
                }
            }
            count >= self.win
        })
    }

    /// Leaves `game_over`/`winner` untouched, like the real authority.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some((board, row_indices, player)) => {
                self.board = board;
                self.row_indices = row_indices;
                self.player = player;
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        let report_ties = self.report_ties;
        let (game_over, winner) = (self.game_over, self.winner);
        *self = Self::new(self.height, self.width, self.win);
        self.report_ties = report_ties;
        self.game_over = game_over;
        self.winner = winner;
    }

    /// First open column, standing in for the real search.
    pub fn best_move(&self) -> Option<usize> {
        (0..self.width).find(|&c| self.is_valid_move(c))
    }
}

/// Fake authority with a call log and failure injection.
#[derive(Debug)]
pub struct FakeAuthority {
    board: Mutex<FakeBoard>,
    calls: Mutex<Vec<&'static str>>,
    fail_next: Mutex<Option<BoardErrorKind>>,
    ai_answer: Mutex<Option<Option<usize>>>,
}

impl FakeAuthority {
    pub fn new(board: FakeBoard) -> Self {
        Self {
            board: Mutex::new(board),
            calls: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
            ai_answer: Mutex::new(None),
        }
    }

    /// Standard 6x7, four to win.
    pub fn standard() -> Self {
        Self::new(FakeBoard::new(6, 7, 4))
    }

    /// Makes the next call fail with `kind`.
    pub fn fail_next(&self, kind: BoardErrorKind) {
        *self.fail_next.lock().unwrap() = Some(kind);
    }

    /// Overrides what the next AI queries answer.
    pub fn set_ai_answer(&self, answer: Option<usize>) {
        *self.ai_answer.lock().unwrap() = Some(answer);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    pub fn with_board<T>(&self, f: impl FnOnce(&mut FakeBoard) -> T) -> T {
        f(&mut self.board.lock().unwrap())
    }

    fn enter(&self, name: &'static str) -> Result<(), BoardError> {
        self.calls.lock().unwrap().push(name);
        match self.fail_next.lock().unwrap().take() {
            Some(kind) => Err(BoardError::new(kind, format!("injected {} failure", name))),
            None => Ok(()),
        }
    }

    fn current(&self) -> Result<BoardSnapshot, BoardError> {
        self.board.lock().unwrap().snapshot().checked()
    }
}

#[async_trait::async_trait]
impl BoardAuthority for FakeAuthority {
    async fn load_board(&self) -> Result<BoardSnapshot, BoardError> {
        self.enter("load_board")?;
        self.current()
    }

    async fn create_board(&self, dimensions: BoardDimensions) -> Result<BoardSnapshot, BoardError> {
        self.enter("create_board")?;
        let mut board = self.board.lock().unwrap();
        let report_ties = board.report_ties;
        *board = FakeBoard::new(dimensions.height(), dimensions.width(), dimensions.win());
        board.report_ties = report_ties;
        board.snapshot().checked()
    }

    async fn reset(&self) -> Result<BoardSnapshot, BoardError> {
        self.enter("reset")?;
        self.board.lock().unwrap().reset();
        self.current()
    }

    async fn undo_move(&self) -> Result<BoardSnapshot, BoardError> {
        self.enter("undo_move")?;
        if !self.board.lock().unwrap().undo() {
            return Err(BoardError::new(BoardErrorKind::InvalidOperation, "No moves to undo"));
        }
        self.current()
    }

    async fn make_move(&self, column: usize) -> Result<BoardSnapshot, BoardError> {
        self.enter("make_move")?;
        self.board
            .lock()
            .unwrap()
            .make_move(column)
            .map_err(|detail| BoardError::new(BoardErrorKind::InvalidMove, detail))?;
        self.current()
    }

    async fn best_move(&self) -> Result<Option<usize>, BoardError> {
        self.enter("best_move")?;
        if let Some(answer) = *self.ai_answer.lock().unwrap() {
            return Ok(answer);
        }
        Ok(self.board.lock().unwrap().best_move())
    }
}

/// Board shared between the HTTP fake and the test body.
pub type SharedBoard = Arc<Mutex<FakeBoard>>;

type Rejection = (StatusCode, Json<Value>);

fn detail(status: StatusCode, message: &str) -> Rejection {
    (status, Json(json!({ "detail": message })))
}

#[derive(Debug, Deserialize)]
struct CreateBody {
    height: usize,
    width: usize,
    win: usize,
}

#[derive(Debug, Deserialize)]
struct MoveBody {
    column: usize,
}

async fn get_board(State(board): State<SharedBoard>) -> Json<Value> {
    Json(board.lock().unwrap().snapshot_json())
}

async fn create_board(
    State(board): State<SharedBoard>,
    Json(body): Json<CreateBody>,
) -> Result<Json<Value>, Rejection> {
    if body.height < body.win || body.width < body.win {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            "The number of tokens in a row required for victory must not exceed either dimension of the board.",
        ));
    }
    let mut board = board.lock().unwrap();
    *board = FakeBoard::new(body.height, body.width, body.win);
    Ok(Json(board.snapshot_json()))
}

async fn reset(State(board): State<SharedBoard>) -> Json<Value> {
    let mut board = board.lock().unwrap();
    board.reset();
    Json(board.snapshot_json())
}

async fn undo_move(State(board): State<SharedBoard>) -> Result<Json<Value>, Rejection> {
    let mut board = board.lock().unwrap();
    if !board.undo() {
        return Err(detail(StatusCode::BAD_REQUEST, "No moves to undo"));
    }
    Ok(Json(board.snapshot_json()))
}

async fn make_move(
    State(board): State<SharedBoard>,
    Json(body): Json<MoveBody>,
) -> Result<Json<Value>, Rejection> {
    let mut board = board.lock().unwrap();
    board
        .make_move(body.column)
        .map_err(|message| detail(StatusCode::BAD_REQUEST, &message))?;
    Ok(Json(board.snapshot_json()))
}

async fn get_best_move(State(board): State<SharedBoard>) -> Json<Option<usize>> {
    Json(board.lock().unwrap().best_move())
}

/// Router speaking the authority's HTTP contract over `board`.
pub fn authority_router(board: SharedBoard) -> Router {
    Router::new()
        .route("/get_board", get(get_board))
        .route("/create_board", post(create_board))
        .route("/reset", post(reset))
        .route("/undo_move", post(undo_move))
        .route("/make_move", post(make_move))
        .route("/get_best_move", get(get_best_move))
        .with_state(board)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Test server failed");
    });
    format!("http://{}", addr)
}

/// Serves a fake authority and returns its URL and board.
pub async fn spawn_http_authority(board: FakeBoard) -> (String, SharedBoard) {
    let shared = Arc::new(Mutex::new(board));
    let url = serve(authority_router(shared.clone())).await;
    (url, shared)
}

/// Column order that fills a 4x4 board without four in a row anywhere.
pub const TIE_4X4: [usize; 16] = [0, 2, 2, 0, 0, 2, 2, 0, 1, 3, 3, 1, 1, 3, 3, 1];
