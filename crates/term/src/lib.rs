//! Terminal rendering for the game.
//!
//! Views draw into a plain [`FrameBuffer`]; [`TerminalRenderer`] diffs frames and
//! flushes them through crossterm. Board cells are drawn two columns wide to
//! compensate for the aspect ratio of terminal glyphs.

pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{piece_color, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, KEY_HELP};
pub use menu_view::{GameOverSummary, MenuView};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
