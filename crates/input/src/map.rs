//! Key mapping from terminal events to player intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a player intent.
///
/// There is no soft or hard drop: pieces fall only on the engine tick.
pub fn handle_key_event(key: KeyEvent) -> Option<Intent> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Intent::MoveRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(Intent::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Intent::RotateCcw),
        _ => None,
    }
}

/// Check if key should quit the preview.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Check if key should re-initialize the game.
pub fn is_restart(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R'))
}
