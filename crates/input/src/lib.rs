//! Terminal input for the droplet board preview.
//!
//! Maps `crossterm` key events into [`crate::types::Intent`]. Restart and quit
//! are session controls rather than game intents, so they get their own
//! predicates.

pub mod map;

pub use droplet_tetris_types as types;

pub use map::{handle_key_event, is_restart, should_quit};
