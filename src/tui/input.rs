//! Key bindings.

use connect_four_client::Intent;
use crossterm::event::KeyCode;

use super::app::FormField;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Forward to the session controller as is.
    Session(Intent),
    /// Drop a token in the cursor column.
    DropAtCursor,
    /// Start a new game with the form's dimensions.
    NewGame,
    /// Move the cursor left.
    CursorLeft,
    /// Move the cursor right.
    CursorRight,
    /// Nudge a form field up (`true`) or down (`false`).
    Adjust(FormField, bool),
    /// Leave the UI.
    Quit,
}

/// Maps a key to an action.
pub fn action_for_key(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => Action::DropAtCursor,
        KeyCode::Char(c) if c.is_ascii_digit() => {
            Action::Session(Intent::Move(c.to_digit(10)? as usize))
        }
        KeyCode::Char('a') => Action::Session(Intent::AiMove),
        KeyCode::Char('u') => Action::Session(Intent::Undo),
        KeyCode::Char('r') => Action::Session(Intent::Reset),
        KeyCode::Char('g') => Action::Session(Intent::Refresh),
        KeyCode::Char('n') => Action::NewGame,
        KeyCode::Char('h') => Action::Adjust(FormField::Height, false),
        KeyCode::Char('H') => Action::Adjust(FormField::Height, true),
        KeyCode::Char('w') => Action::Adjust(FormField::Width, false),
        KeyCode::Char('W') => Action::Adjust(FormField::Width, true),
        KeyCode::Char('k') => Action::Adjust(FormField::Win, false),
        KeyCode::Char('K') => Action::Adjust(FormField::Win, true),
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}
