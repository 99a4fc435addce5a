//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! from the engine, the session driver and the terminal shell alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: (3, 0), i.e. `BOARD_WIDTH / 2 - 2`
//!
//! # Speed Curve
//!
//! The fall interval shrinks superlinearly with level:
//!
//! ```text
//! interval(level) = max(MIN_FALL_MS, BASE_FALL_MS - level^SPEED_EXPONENT * SPEED_SCALE)
//! ```
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 760ms |
//! | 2 | 708ms |
//! | 5 | 524ms |
//! | 10 | 166ms |
//! | 11+ | 100ms floor |
//!
//! # Scoring
//!
//! ```text
//! score(lines, combo, level) = BASE_SCORE * 2^(lines-1)
//!                              * (1 + combo * COMBO_RATE_PCT / 100)
//!                              * (1 + level * LEVEL_RATE_PCT / 100)
//! ```
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.index(), 3);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(-1), Rotation::West);
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor column (top-centre for a 4-wide bounding box)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Spawn anchor row
pub const SPAWN_Y: i8 = 0;

/// Shell frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Fall interval before any level is applied (milliseconds per row)
pub const BASE_FALL_MS: u32 = 800;

/// Exponent applied to the level in the speed curve (> 1 accelerates superlinearly)
pub const SPEED_EXPONENT: f64 = 1.2;

/// Milliseconds removed per unit of `level^SPEED_EXPONENT`
pub const SPEED_SCALE: f64 = 40.0;

/// Fall interval floor; gravity never gets faster than this
pub const MIN_FALL_MS: u32 = 100;

/// Points for a single-line clear before multipliers
pub const BASE_SCORE: u32 = 100;

/// Bonus per combo step, in percent (20% = 0.2)
pub const COMBO_RATE_PCT: u32 = 20;

/// Bonus per level, in percent (50% = 0.5)
pub const LEVEL_RATE_PCT: u32 = 50;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Number of scores persisted in the high-score file
pub const HIGH_SCORES_KEPT: usize = 5;

/// Number of scores shown on the high-score screen
pub const HIGH_SCORES_SHOWN: usize = 10;

/// High-score file name, relative to the working directory
pub const HIGH_SCORE_FILE: &str = "highscores.txt";


/// The seven tetromino piece kinds
///
/// The classic game numbers them 1..=7 in this order; [`PieceKind::index`]
/// keeps that numbering for the snapshot grid, where 0 means empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in classic order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Classic 1-based code (I=1 ... L=7)
    pub fn index(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::index`]; 0 and anything above 7 are not pieces
    pub fn from_index(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Rotation index 0..=3
///
/// - **North** (0): spawn orientation
/// - **East** (1): one clockwise step
/// - **South** (2): two steps
/// - **West** (3): one counter-clockwise step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Numeric rotation index (0..=3)
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an arbitrary integer, reduced mod 4 (negative values wrap)
    pub fn from_index(i: i32) -> Self {
        match i.rem_euclid(4) {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (index + 1)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() as i32 + 1)
    }

    /// Rotate counter-clockwise (index - 1)
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() as i32 - 1)
    }
}

/// Discrete commands the shell feeds into the engine
///
/// Human input and the fall timer both arrive as commands, so the engine can
/// be driven deterministically without a real clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Player-initiated one-row drop (locks if blocked)
    SoftDrop,
    /// Drop to the lowest legal position and lock
    HardDrop,
    /// Rotate 90° clockwise
    RotateCw,
    /// Rotate 90° counter-clockwise
    RotateCcw,
    /// Toggle pause
    Pause,
    /// One gravity step from the fall timer
    Tick,
}

impl Command {
    /// Parse from the camelCase command name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATECW"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "harddrop" => Some(Command::HardDrop),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "pause" => Some(Command::Pause),
            "tick" => Some(Command::Tick),
            _ => None,
        }
    }

    /// camelCase command name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Pause => "pause",
            Command::Tick => "tick",
        }
    }
}

/// Difficulty chosen from the start menu; each maps to a starting level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Starting level for this difficulty
    pub fn level(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: cell locked with the given piece kind
pub type Cell = Option<PieceKind>;
