use crate::game_engine::Phase;
use crate::piece::Piece;
use crate::pieces::PieceShape;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub cells: PieceShape,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

/// Read-only view of the engine for the presentation shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// 0 = empty, 1..=7 = [`PieceKind::index`]
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.current = None;
        self.next = PieceKind::I;
        self.phase = Phase::Idle;
        self.paused = false;
        self.game_over = false;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.fall_interval_ms = 0;
    }

    /// Board cell kind at (x, y), if locked
    pub fn cell(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&v| PieceKind::from_index(v))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: None,
            next: PieceKind::I,
            phase: Phase::Idle,
            paused: false,
            game_over: false,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            fall_interval_ms: 0,
        };
        s.clear();
        s
    }
}
