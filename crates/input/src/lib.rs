//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s for the session
//! and into [`MenuKey`]s for the menu screens. Held keys are handled by the
//! terminal's own auto-repeat: repeat events are treated like presses.

pub mod map;

pub use blockfall_types as types;

pub use map::{game_command, is_actionable, is_back, is_new_game, menu_key, should_quit, MenuKey};
