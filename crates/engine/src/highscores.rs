//! High-score table persistence
//!
//! The table is a plain text file with one integer per line, best first. Only the
//! top [`HIGH_SCORES_KEPT`] entries are written back. Loading never fails: a
//! missing, unreadable or malformed file is treated as an empty table, and the
//! problem is logged once until the next successful save.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use blockfall_types::{HIGH_SCORES_KEPT, HIGH_SCORES_SHOWN, HIGH_SCORE_FILE};

/// Where finished games' scores go
pub trait HighScoreStore {
    /// Current table, best first (at most [`HIGH_SCORES_SHOWN`] entries)
    fn load(&self) -> Vec<u32>;

    /// Insert `score`, keep the best entries and persist; returns the new table
    fn record(&mut self, score: u32) -> Result<Vec<u32>>;
}

/// Insert a score into a table, sort descending and keep the best entries
pub fn insert_score(table: &mut Vec<u32>, score: u32) {
    table.push(score);
    table.sort_unstable_by(|a, b| b.cmp(a));
    table.truncate(HIGH_SCORES_KEPT);
}

/// 1-based position of `score` in `table`, if present
pub fn rank_of(table: &[u32], score: u32) -> Option<usize> {
    table.iter().position(|&s| s == score).map(|i| i + 1)
}

/// Parse the file format: whitespace-separated non-negative integers
pub fn parse_scores(text: &str) -> Option<Vec<u32>> {
    text.split_whitespace()
        .take(HIGH_SCORES_SHOWN)
        .map(|tok| tok.parse::<u32>().ok())
        .collect()
}

/// File-backed table, `highscores.txt` in the working directory by default
#[derive(Debug, Clone)]
pub struct FileHighScores {
    path: PathBuf,
    warned: Cell<bool>,
}

impl FileHighScores {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            warned: Cell::new(false),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Vec<u32>>> {
        if !self.path.exists() {
            return Ok(Some(Vec::new()));
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        Ok(parse_scores(&text))
    }

    /// Log a load problem unless one was already logged
    fn warn_once(&self, msg: std::fmt::Arguments<'_>) {
        if !self.warned.replace(true) {
            eprintln!("[HighScores] {}", msg);
        }
    }

    fn write(&self, table: &[u32]) -> Result<()> {
        let mut out = String::with_capacity(table.len() * 8);
        for score in table {
            out.push_str(&score.to_string());
            out.push('\n');
        }
        fs::write(&self.path, out)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

impl Default for FileHighScores {
    fn default() -> Self {
        Self::new(HIGH_SCORE_FILE)
    }
}

impl HighScoreStore for FileHighScores {
    fn load(&self) -> Vec<u32> {
        match self.read() {
            Ok(Some(table)) => table,
            Ok(None) => {
                self.warn_once(format_args!(
                    "Ignoring malformed table in {}",
                    self.path.display()
                ));
                Vec::new()
            }
            Err(e) => {
                self.warn_once(format_args!("{:#}", e));
                Vec::new()
            }
        }
    }

    fn record(&mut self, score: u32) -> Result<Vec<u32>> {
        let mut table = self.load();
        insert_score(&mut table, score);
        self.write(&table)?;
        self.warned.set(false);
        Ok(table)
    }
}

/// In-memory table for tests and headless runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHighScores {
    scores: Vec<u32>,
}

impl MemoryHighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(HIGH_SCORES_KEPT);
        Self { scores }
    }
}

impl HighScoreStore for MemoryHighScores {
    fn load(&self) -> Vec<u32> {
        self.scores.clone()
    }

    fn record(&mut self, score: u32) -> Result<Vec<u32>> {
        insert_score(&mut self.scores, score);
        Ok(self.scores.clone())
    }
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&self) -> Vec<u32> {
        (**self).load()
    }

    fn record(&mut self, score: u32) -> Result<Vec<u32>> {
        (**self).record(score)
    }
}
