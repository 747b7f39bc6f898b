//! Key mapping from terminal events to viewer actions.

use crate::types::MoveAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key code to a viewer action.
pub fn map_key(code: KeyCode) -> Option<MoveAction> {
    match code {
        // Movement
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(MoveAction::Forward),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(MoveAction::Back),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(MoveAction::StrafeLeft),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(MoveAction::StrafeRight),

        // Camera pan
        KeyCode::Left => Some(MoveAction::PanLeft),
        KeyCode::Right => Some(MoveAction::PanRight),

        // Toggles
        KeyCode::Char('c') | KeyCode::Char('C') => Some(MoveAction::ToggleColors),
        KeyCode::Char('v') | KeyCode::Char('V') | KeyCode::Tab => Some(MoveAction::ToggleLayers),

        _ => None,
    }
}

/// Map a full key event, ignoring anything chorded with Ctrl or Alt.
pub fn handle_key_event(key: KeyEvent) -> Option<MoveAction> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    map_key(key.code)
}

/// Check if key should quit the viewer.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
