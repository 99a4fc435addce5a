//! Session driver - command queue, gravity clock and game-over hand-off
//!
//! The shell pushes commands as input arrives and calls [`Session::advance`] once
//! per frame with the elapsed wall-clock time. Elapsed time becomes
//! [`Command::Tick`]s queued behind any player commands, and the whole queue is
//! applied in order. Ticks are only generated while the engine is running; a tick
//! still queued when a pause lands is dropped. At most one tick is generated per
//! call, so fall periods missed during a stall collapse into a single step.

use std::collections::VecDeque;

use blockfall_core::{FinalStats, GameEngine, GameSnapshot, LockEvent, Phase};
use blockfall_types::{Command, Difficulty};

use crate::clock::FallClock;
use crate::highscores::{rank_of, HighScoreStore};

/// Gravity steps a single `advance` may queue
pub const MAX_TICKS_PER_ADVANCE: u32 = 1;

/// Outcome of a finished game once its score has been handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverReport {
    pub stats: FinalStats,
    /// 1-based rank in the saved table, if the score made it
    pub rank: Option<usize>,
    /// False if the store failed to persist the score
    pub saved: bool,
    /// Table after recording (empty if saving failed)
    pub table: Vec<u32>,
}

pub struct Session<S: HighScoreStore> {
    engine: GameEngine,
    queue: VecDeque<Command>,
    clock: FallClock,
    store: S,
    events: Vec<LockEvent>,
}

impl<S: HighScoreStore> Session<S> {
    pub fn new(engine: GameEngine, store: S) -> Self {
        let clock = FallClock::new(engine.fall_interval_ms());
        Self {
            engine,
            queue: VecDeque::new(),
            clock,
            store,
            events: Vec::new(),
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &FallClock {
        &self.clock
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.engine.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.engine.snapshot_into(out);
    }

    /// Current high-score table from the store
    pub fn high_scores(&self) -> Vec<u32> {
        self.store.load()
    }

    /// Commands waiting to be applied
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Lock events collected since the last call
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, LockEvent> {
        self.events.drain(..)
    }

    /// Start (or restart) a game at the remembered starting level
    pub fn start(&mut self) {
        self.queue.clear();
        self.events.clear();
        self.engine.start_game();
        self.sync_clock();
        self.clock.restart();
    }

    /// Apply a difficulty choice; takes effect for the next `start`
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.engine.set_level(difficulty.level());
        self.sync_clock();
    }

    /// Queue a command for the next `pump`
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Let `elapsed_ms` of game time pass, then apply everything queued
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<GameOverReport> {
        if self.engine.is_running() {
            let ticks = self.clock.advance(elapsed_ms).min(MAX_TICKS_PER_ADVANCE);
            for _ in 0..ticks {
                self.queue.push_back(Command::Tick);
            }
        }
        self.pump()
    }

    /// Apply all queued commands in order
    ///
    /// Returns a report when the game ended during this call.
    pub fn pump(&mut self) -> Option<GameOverReport> {
        while let Some(command) = self.queue.pop_front() {
            if command == Command::Tick && !self.engine.is_running() {
                continue;
            }

            let was_paused = self.engine.is_paused();
            self.engine.apply(command);

            if let Some(event) = self.engine.take_last_event() {
                if event.leveled_up {
                    self.sync_clock();
                }
                self.events.push(event);
            }
            if was_paused && self.engine.is_running() {
                self.clock.restart();
            }
            if self.engine.is_game_over() {
                self.queue.clear();
                break;
            }
        }

        if self.engine.is_game_over() {
            return self.finish();
        }
        None
    }

    /// Hand the final score to the store and return the engine to Idle
    fn finish(&mut self) -> Option<GameOverReport> {
        let stats = self.engine.end_session()?;

        let report = match self.store.record(stats.score) {
            Ok(table) => GameOverReport {
                stats,
                rank: rank_of(&table, stats.score),
                saved: true,
                table,
            },
            Err(e) => {
                eprintln!("[Session] Failed to save high score {}: {:#}", stats.score, e);
                GameOverReport {
                    stats,
                    rank: None,
                    saved: false,
                    table: Vec::new(),
                }
            }
        };
        Some(report)
    }

    fn sync_clock(&mut self) {
        self.clock.set_interval(self.engine.fall_interval_ms());
    }
}
