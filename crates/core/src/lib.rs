//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to play one session of the falling-block game: the grid,
//! the seven piece shapes, the falling piece, scoring and the engine state
//! machine that ties them together. No I/O, no clocks, no terminal.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and row clearing
//! - [`pieces`]: the immutable shape table (7 kinds x 4 rotations)
//! - [`piece`]: the falling piece as a kind, a rotation and an anchor
//! - [`scoring`]: score, level and gravity curves
//! - [`rng`]: seeded piece randomizers
//! - [`game_engine`]: the session state machine
//! - [`snapshot`]: read-only view for renderers
//!
//! # Rules
//!
//! - Pieces spawn at column 3, row 0, rotation 0; a blocked spawn ends the game
//! - No wall kicks: a rotation that collides with anything is rejected
//! - A piece locks when it cannot fall any further; full rows are then removed
//! - Consecutive clearing locks build a combo that multiplies the score
//! - Every 10 lines raise the level, which shortens the fall interval
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameEngine;
//! use blockfall_types::Command;
//!
//! let mut game = GameEngine::new(12345);
//! game.start_game();
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateCw);
//! game.apply(Command::HardDrop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.score(), 0); // nothing cleared yet
//! ```
//!
//! The engine has no notion of time. Drive gravity by calling
//! [`GameEngine::tick`] every [`GameEngine::fall_interval_ms`] milliseconds.

pub mod board;
pub mod game_engine;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, ClearedRows};
pub use game_engine::{FinalStats, GameEngine, LockEvent, Phase};
pub use piece::Piece;
pub use pieces::{get_shape, get_spawn_shape, PieceShape, ShapeTable, CLASSIC_SHAPES};
pub use rng::{PieceGenerator, Randomizer, SimpleRng};
pub use scoring::{fall_interval_ms, level_for, score_for, ScoringPolicy};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
