//! Connect Four client - local mirror of a remote board authority
//!
//! The authority owns the board, the rules, and the AI. This crate keeps a
//! consistent local copy of its state, relays player intents to it, and
//! decides locally when play must stop.
//!
//! # Architecture
//!
//! - **Client**: [`BoardAuthority`] contract and its HTTP implementation
//! - **Session**: [`SessionState`], replaced wholesale by each snapshot
//! - **Termination**: win/tie detection over a snapshot
//! - **Render**: pure projection of the session for a presentation layer
//! - **Notifications**: self-clearing error/success messages
//! - **Controller**: [`SessionController`], the state machine tying them together
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use connect_four_client::{HttpBoardClient, Intent, Notifications, SessionController};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = HttpBoardClient::new("http://127.0.0.1:8000", Duration::from_secs(10))?;
//! let mut controller = SessionController::new(client, Notifications::default());
//! controller.load_board().await;
//! controller.dispatch(Intent::Move(3)).await;
//! println!("{}", controller.render());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod config;
mod controller;
mod error;
mod notify;
mod render;
mod session;
mod snapshot;
mod termination;

// Crate-level exports - Authority access
pub use client::{BoardAuthority, BoardDimensions, HttpBoardClient};

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError, SERVER_URL_ENV};

// Crate-level exports - Session control
pub use controller::{Intent, IntentOutcome, SessionController};

// Crate-level exports - Errors
pub use error::{BoardError, BoardErrorKind};

// Crate-level exports - Notifications
pub use notify::{Notification, NotificationKind, Notifications};

// Crate-level exports - Rendering
pub use render::{ColumnView, RenderModel, StatusKind, StatusLine, build as build_render_model};

// Crate-level exports - Session state
pub use session::{SessionPhase, SessionState};

// Crate-level exports - Board data
pub use snapshot::{BoardSnapshot, Mark, Player};
pub use termination::{Outcome, Termination, detect as detect_termination};
