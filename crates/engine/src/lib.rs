//! Session-level driver around the pure core engine.
//!
//! - [`clock`]: converts elapsed time into gravity ticks
//! - [`session`]: FIFO command queue feeding `GameEngine::apply`
//! - [`highscores`]: the high-score table collaborator

pub mod clock;
pub mod highscores;
pub mod session;

pub use clock::FallClock;
pub use highscores::{FileHighScores, HighScoreStore, MemoryHighScores};
pub use session::{GameOverReport, Session, MAX_TICKS_PER_ADVANCE};
