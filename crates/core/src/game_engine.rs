//! Game engine module - one game session as a state machine
//!
//! The engine owns the board, the current and next pieces and all counters.
//! Every transition is a synchronous command: it either applies, or it is rolled
//! back and leaves the state untouched. The only terminal condition is a top-out
//! at spawn time, which moves the engine to [`Phase::GameOver`].
//!
//! ```text
//! Idle --start_game--> Running <--toggle_pause--> Paused
//!                         |
//!                      top out
//!                         v
//!                      GameOver --end_session--> Idle
//! ```

use crate::board::Board;
use crate::piece::Piece;
use crate::rng::{PieceGenerator, Randomizer};
use crate::scoring::ScoringPolicy;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// What happened on the most recent lock (consumed by the shell)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Cells written into the grid (cells above the board are dropped)
    pub cells_locked: u8,
    pub lines_cleared: u32,
    pub score_delta: u32,
    /// Combo streak after this lock
    pub combo: u32,
    /// Level after this lock
    pub level: u32,
    pub leveled_up: bool,
}

/// Final numbers handed to the high-score collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalStats {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    current: Option<Piece>,
    next: PieceKind,
    generator: PieceGenerator,
    policy: ScoringPolicy,
    phase: Phase,
    score: u32,
    level: u32,
    /// Level used by `start_game` (set by difficulty select)
    start_level: u32,
    lines: u32,
    combo: u32,
    fall_interval_ms: u32,
    pieces_locked: u32,
    last_event: Option<LockEvent>,
}

impl GameEngine {
    /// Create an idle engine with the classic rules and a uniform randomizer
    pub fn new(seed: u32) -> Self {
        Self::with_policy(seed, ScoringPolicy::CLASSIC, Randomizer::Uniform)
    }

    pub fn with_policy(seed: u32, policy: ScoringPolicy, randomizer: Randomizer) -> Self {
        let mut generator = PieceGenerator::new(seed, randomizer);
        let next = generator.draw();

        Self {
            board: Board::new(),
            current: None,
            next,
            generator,
            policy,
            phase: Phase::Idle,
            score: 0,
            level: 1,
            start_level: 1,
            lines: 0,
            combo: 0,
            fall_interval_ms: policy.fall_interval_ms(1),
            pieces_locked: 0,
            last_event: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn seed(&self) -> u32 {
        self.generator.seed()
    }

    /// Mutable board access for setting up scenarios in tests and benches
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.current = self.current.map(ActiveSnapshot::from);
        out.next = self.next;
        out.phase = self.phase;
        out.paused = self.is_paused();
        out.game_over = self.is_game_over();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.fall_interval_ms = self.fall_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a new session at the level chosen with [`GameEngine::set_level`] (default 1)
    pub fn start_game(&mut self) {
        self.start_game_at(self.start_level);
    }

    /// Start a new session at `level`, discarding any session in progress
    pub fn start_game_at(&mut self, level: u32) {
        self.board.reset();
        self.score = 0;
        self.combo = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.last_event = None;
        self.current = None;
        self.level = level.max(1);
        self.fall_interval_ms = self.policy.fall_interval_ms(self.level);
        self.next = self.generator.draw();
        self.phase = Phase::Running;
        self.spawn();
    }

    /// Difficulty select: overwrite the level and gravity, keep score and lines
    pub fn set_level(&mut self, level: u32) {
        let level = level.max(1);
        self.level = level;
        self.start_level = level;
        self.fall_interval_ms = self.policy.fall_interval_ms(level);
    }

    /// Promote the next piece to the spawn anchor and draw a fresh preview
    ///
    /// Returns false (and ends the game) if the new piece is blocked.
    pub fn spawn(&mut self) -> bool {
        let piece = Piece::new(self.next, Rotation::North, SPAWN_X, SPAWN_Y);
        self.current = Some(piece);
        self.next = self.generator.draw();

        if self.board.collides(&piece.cells()) {
            self.phase = Phase::GameOver;
            return false;
        }
        true
    }

    /// Apply a command; returns whether the state changed
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.move_by(-1),
            Command::MoveRight => self.move_by(1),
            Command::SoftDrop => self.soft_drop(),
            Command::HardDrop => self.hard_drop(),
            Command::RotateCw => self.rotate(true),
            Command::RotateCcw => self.rotate(false),
            Command::Pause => self.toggle_pause(),
            Command::Tick => self.tick(),
        }
    }

    /// One gravity step from the fall timer
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.step_down()
    }

    /// Player-initiated gravity step; identical to a tick
    pub fn soft_drop(&mut self) -> bool {
        self.tick()
    }

    /// Move the current piece horizontally, rolling back on collision
    pub fn move_by(&mut self, dx: i8) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(mut piece) = self.current else {
            return false;
        };

        piece.translate(dx, 0);
        if self.board.collides(&piece.cells()) {
            return false;
        }
        self.current = Some(piece);
        true
    }

    /// Rotate the current piece; any collision (walls, floor or locked cells) rejects it
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(mut piece) = self.current else {
            return false;
        };

        piece.rotate(clockwise);
        if self.board.collides(&piece.cells()) {
            return false;
        }
        self.current = Some(piece);
        true
    }

    /// Drop to the lowest legal position and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let Some(mut piece) = self.current else {
            self.phase = Phase::GameOver;
            return true;
        };

        loop {
            piece.translate(0, 1);
            if self.board.collides(&piece.cells()) {
                piece.translate(0, -1);
                break;
            }
        }
        self.current = Some(piece);
        self.lock_and_spawn();
        true
    }

    /// Running <-> Paused; no-op otherwise
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                true
            }
            Phase::Idle | Phase::GameOver => false,
        }
    }

    /// Leave GameOver for Idle, returning the numbers to persist
    pub fn end_session(&mut self) -> Option<FinalStats> {
        if self.phase != Phase::GameOver {
            return None;
        }
        self.phase = Phase::Idle;
        Some(FinalStats {
            score: self.score,
            level: self.level,
            lines: self.lines,
        })
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Shared by tick and soft drop: fall one row or lock where we are
    fn step_down(&mut self) -> bool {
        let Some(mut piece) = self.current else {
            self.phase = Phase::GameOver;
            return true;
        };

        piece.translate(0, 1);
        if self.board.collides(&piece.cells()) {
            self.lock_and_spawn();
        } else {
            self.current = Some(piece);
        }
        true
    }

    /// Lock the current piece, clear rows, update counters and spawn the next piece
    fn lock_and_spawn(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        let cells_locked = self.board.lock(&piece) as u8;
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let cleared = self.board.clear_full_rows().len() as u32;
        let mut score_delta = 0;
        let mut leveled_up = false;

        if cleared > 0 {
            self.combo += 1;
            self.lines += cleared;
            score_delta = self.policy.score_for(cleared, self.combo, self.level);
            self.score = self.score.saturating_add(score_delta);

            let reached = self.policy.level_for(self.lines);
            if reached > self.level {
                self.level = reached;
                self.fall_interval_ms = self.policy.fall_interval_ms(reached);
                leveled_up = true;
            }
        } else {
            self.combo = 0;
        }

        self.last_event = Some(LockEvent {
            cells_locked,
            lines_cleared: cleared,
            score_delta,
            combo: self.combo,
            level: self.level,
            leveled_up,
        });

        self.spawn();
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn running(seed: u32) -> GameEngine {
        let mut engine = GameEngine::new(seed);
        engine.start_game();
        engine
    }

    /// Replace the current piece (test setup)
    fn force_current(engine: &mut GameEngine, piece: Piece) {
        engine.current = Some(piece);
    }

    fn fill_row_except(board: &mut Board, y: i8, gaps: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = GameEngine::new(12345);

        assert_eq!(engine.phase, Phase::Idle);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.level, 1);
        assert_eq!(engine.lines, 0);
        assert_eq!(engine.combo, 0);
        assert!(engine.current.is_none());
        assert_eq!(engine.fall_interval_ms, 760);
    }

    #[test]
    fn test_commands_ignored_while_idle() {
        let mut engine = GameEngine::new(12345);
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::HardDrop,
            Command::RotateCw,
            Command::RotateCcw,
            Command::Pause,
            Command::Tick,
        ] {
            assert!(!engine.apply(cmd), "{:?} should be ignored", cmd);
        }
        assert_eq!(engine.phase, Phase::Idle);
    }

    #[test]
    fn test_start_game_spawns_at_anchor() {
        let engine = running(12345);

        assert_eq!(engine.phase, Phase::Running);
        let piece = engine.current.unwrap();
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn test_spawn_promotes_next() {
        let mut engine = running(12345);
        let next = engine.next;
        engine.spawn();
        assert_eq!(engine.current.unwrap().kind, next);
    }

    #[test]
    fn test_tick_moves_down() {
        let mut engine = running(12345);
        let y = engine.current.unwrap().y;
        assert!(engine.tick());
        assert_eq!(engine.current.unwrap().y, y + 1);
    }

    #[test]
    fn test_tick_locks_on_floor() {
        let mut engine = running(12345);
        force_current(&mut engine, Piece::new(PieceKind::O, Rotation::North, 0, 18));

        assert!(engine.tick());
        assert_eq!(engine.pieces_locked, 1);
        assert!(engine.board.is_occupied(0, 19));
        assert!(engine.board.is_occupied(1, 18));
        assert_eq!(engine.current.unwrap().y, SPAWN_Y);
    }

    #[test]
    fn test_tick_without_piece_ends_game() {
        let mut engine = running(12345);
        engine.current = None;
        assert!(engine.tick());
        assert_eq!(engine.phase, Phase::GameOver);
    }

    #[test]
    fn test_move_rolls_back_at_wall() {
        let mut engine = running(12345);
        force_current(&mut engine, Piece::new(PieceKind::O, Rotation::North, 0, 5));

        assert!(!engine.move_by(-1));
        assert_eq!(engine.current.unwrap().x, 0);
        assert!(engine.move_by(1));
        assert_eq!(engine.current.unwrap().x, 1);
    }

    #[test]
    fn test_rotate_rejected_by_locked_cells() {
        let mut engine = running(12345);
        // Flat I at row 5; rotating puts a mino at (x+1, 4).
        force_current(&mut engine, Piece::new(PieceKind::I, Rotation::North, 2, 5));
        engine.board.set(3, 4, Some(PieceKind::O));

        assert!(!engine.rotate(true));
        assert_eq!(engine.current.unwrap().rotation, Rotation::North);

        engine.board.set(3, 4, None);
        assert!(engine.rotate(true));
        assert_eq!(engine.current.unwrap().rotation, Rotation::East);
    }

    #[test]
    fn test_rotate_rejected_at_wall() {
        let mut engine = running(12345);
        // Vertical I hugging the right wall: flat would stick out.
        force_current(&mut engine, Piece::new(PieceKind::I, Rotation::East, 8, 5));
        assert!(!engine.rotate(true));
        assert_eq!(engine.current.unwrap().rotation, Rotation::East);
    }

    #[test]
    fn test_hard_drop_single_clear_scores() {
        let mut engine = running(12345);
        fill_row_except(&mut engine.board, 19, &[0, 1, 2, 3]);
        force_current(&mut engine, Piece::new(PieceKind::I, Rotation::North, 0, 0));

        assert!(engine.hard_drop());
        assert_eq!(engine.lines, 1);
        assert_eq!(engine.combo, 1);
        // 100 * 1.2 (combo 1) * 1.5 (level 1)
        assert_eq!(engine.score, 180);
        assert_eq!(engine.board.filled_count(), 0);

        let ev = engine.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 1);
        assert_eq!(ev.score_delta, 180);
        assert_eq!(ev.cells_locked, 4);
        assert!(!ev.leveled_up);
        assert!(engine.take_last_event().is_none());
    }

    #[test]
    fn test_combo_resets_on_empty_lock() {
        let mut engine = running(12345);
        fill_row_except(&mut engine.board, 19, &[0, 1, 2, 3]);
        force_current(&mut engine, Piece::new(PieceKind::I, Rotation::North, 0, 0));
        engine.hard_drop();
        assert_eq!(engine.combo, 1);

        force_current(&mut engine, Piece::new(PieceKind::O, Rotation::North, 4, 0));
        engine.hard_drop();
        assert_eq!(engine.combo, 0);
        assert_eq!(engine.lines, 1);
    }

    #[test]
    fn test_combo_streak_multiplies() {
        let mut engine = running(12345);
        fill_row_except(&mut engine.board, 19, &[0, 1, 2, 3]);
        fill_row_except(&mut engine.board, 18, &[0, 1, 2, 3]);

        force_current(&mut engine, Piece::new(PieceKind::I, Rotation::North, 0, 0));
        engine.hard_drop();
        assert_eq!(engine.score, 180);

        force_current(&mut engine, Piece::new(PieceKind::I, Rotation::North, 0, 0));
        engine.hard_drop();
        // Second consecutive clear: 100 * 1.4 * 1.5 = 210
        assert_eq!(engine.combo, 2);
        assert_eq!(engine.score, 180 + 210);
    }

    #[test]
    fn test_level_up_refreshes_interval() {
        let mut engine = running(12345);
        engine.lines = 9;
        fill_row_except(&mut engine.board, 19, &[0, 1, 2, 3]);
        force_current(&mut engine, Piece::new(PieceKind::I, Rotation::North, 0, 0));

        engine.hard_drop();
        assert_eq!(engine.lines, 10);
        assert_eq!(engine.level, 2);
        assert_eq!(engine.fall_interval_ms, 708);
        assert!(engine.take_last_event().unwrap().leveled_up);
    }

    #[test]
    fn test_level_never_drops_below_chosen_start() {
        let mut engine = GameEngine::new(12345);
        engine.set_level(3);
        engine.start_game();
        assert_eq!(engine.level, 3);

        fill_row_except(&mut engine.board, 19, &[0, 1, 2, 3]);
        force_current(&mut engine, Piece::new(PieceKind::I, Rotation::North, 0, 0));
        engine.hard_drop();
        assert_eq!(engine.level, 3);
    }

    #[test]
    fn test_top_out_ends_game_without_scoring() {
        let mut engine = running(12345);
        for y in 0..2 {
            for x in 0..BOARD_WIDTH as i8 - 1 {
                engine.board.set(x, y, Some(PieceKind::S));
            }
        }
        let score = engine.score;

        assert!(!engine.spawn());
        assert_eq!(engine.phase, Phase::GameOver);
        assert_eq!(engine.score, score);
        assert!(!engine.tick());
    }

    #[test]
    fn test_end_session_returns_to_idle() {
        let mut engine = running(12345);
        assert!(engine.end_session().is_none());

        engine.phase = Phase::GameOver;
        engine.score = 1234;
        let stats = engine.end_session().unwrap();
        assert_eq!(stats.score, 1234);
        assert_eq!(engine.phase, Phase::Idle);
        assert!(engine.end_session().is_none());
    }

    #[test]
    fn test_pause_blocks_movement() {
        let mut engine = running(12345);
        assert!(engine.apply(Command::Pause));
        assert!(engine.is_paused());
        assert!(!engine.apply(Command::MoveLeft));
        assert!(!engine.apply(Command::Tick));
        assert!(engine.apply(Command::Pause));
        assert!(engine.is_running());
    }

    #[test]
    fn test_set_level_keeps_score_and_lines() {
        let mut engine = running(12345);
        engine.score = 500;
        engine.lines = 7;
        engine.set_level(5);
        assert_eq!(engine.level, 5);
        assert_eq!(engine.fall_interval_ms, engine.policy.fall_interval_ms(5));
        assert_eq!(engine.score, 500);
        assert_eq!(engine.lines, 7);
    }

    #[test]
    fn test_restart_resets_counters() {
        let mut engine = running(12345);
        engine.score = 900;
        engine.lines = 12;
        engine.combo = 3;
        engine.board.set(0, BOARD_HEIGHT as i8 - 1, Some(PieceKind::T));

        engine.start_game();
        assert_eq!(engine.score, 0);
        assert_eq!(engine.lines, 0);
        assert_eq!(engine.combo, 0);
        assert_eq!(engine.board.filled_count(), 0);
        assert_eq!(engine.phase, Phase::Running);
    }
}
