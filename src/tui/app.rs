//! Terminal UI state that isn't session state.

use connect_four_client::{ClientConfig, Intent};
use tracing::debug;

/// Largest height or width the new-game form offers.
pub const MAX_DIMENSION: usize = 12;

/// A field of the new-game form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    /// Rows.
    Height,
    /// Columns.
    Width,
    /// Win length.
    Win,
}

/// Dimensions the next new game will use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewGameForm {
    /// Rows.
    pub height: usize,
    /// Columns.
    pub width: usize,
    /// Win length.
    pub win: usize,
}

impl NewGameForm {
    /// Nudges a field by one, staying within `1..=MAX_DIMENSION`.
    ///
    /// The form does not enforce that the win length fits; the controller
    /// rejects that with a notification.
    pub fn adjust(&mut self, field: FormField, increase: bool) {
        let value = match field {
            FormField::Height => &mut self.height,
            FormField::Width => &mut self.width,
            FormField::Win => &mut self.win,
        };
        *value = if increase {
            (*value + 1).min(MAX_DIMENSION)
        } else {
            value.saturating_sub(1).max(1)
        };
        debug!(?field, form = ?self, "New game form adjusted");
    }

    /// Intent that starts a game with these dimensions.
    pub fn intent(&self) -> Intent {
        Intent::NewGame {
            height: self.height,
            width: self.width,
            win: self.win,
        }
    }
}

impl From<&ClientConfig> for NewGameForm {
    fn from(config: &ClientConfig) -> Self {
        Self {
            height: *config.default_height(),
            width: *config.default_width(),
            win: *config.default_win(),
        }
    }
}

/// Cursor, form, and busy flag.
#[derive(Debug, Clone)]
pub struct App {
    cursor: usize,
    form: NewGameForm,
    busy: bool,
}

impl App {
    /// Creates the UI state.
    pub fn new(form: NewGameForm) -> Self {
        Self {
            cursor: 0,
            form,
            busy: false,
        }
    }

    /// Column under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// New-game form.
    pub fn form(&self) -> &NewGameForm {
        &self.form
    }

    /// Mutable new-game form.
    pub fn form_mut(&mut self) -> &mut NewGameForm {
        &mut self.form
    }

    /// Whether a request is outstanding.
    pub fn busy(&self) -> bool {
        self.busy
    }

    /// Marks a request as outstanding or finished.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Moves the cursor one column left.
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor one column right, stopping at the last column.
    pub fn cursor_right(&mut self, width: usize) {
        if self.cursor + 1 < width {
            self.cursor += 1;
        }
    }

    /// Keeps the cursor on the board after its width changes.
    pub fn clamp_cursor(&mut self, width: usize) {
        self.cursor = self.cursor.min(width.saturating_sub(1));
    }
}
