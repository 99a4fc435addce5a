//! Scoring module - score, level and speed curves
//!
//! All functions are pure. Line clears are rewarded exponentially in the number
//! of rows (100/200/400/800 before multipliers), and both the combo streak and the
//! current level add a percentage on top. Rates are stored as integer percentages
//! so scores are computed exactly, with no floating-point rounding surprises.

use crate::types::{
    BASE_FALL_MS, BASE_SCORE, COMBO_RATE_PCT, LEVEL_RATE_PCT, LINES_PER_LEVEL, MIN_FALL_MS,
    SPEED_EXPONENT, SPEED_SCALE,
};

/// Tuning knobs for scoring, leveling and gravity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    pub base_score: u32,
    pub combo_rate_pct: u32,
    pub level_rate_pct: u32,
    pub lines_per_level: u32,
    pub base_fall_ms: u32,
    pub speed_exponent: f64,
    pub speed_scale: f64,
    pub min_fall_ms: u32,
}

impl ScoringPolicy {
    /// The classic curve, built from the constants in `blockfall-types`
    pub const CLASSIC: ScoringPolicy = ScoringPolicy {
        base_score: BASE_SCORE,
        combo_rate_pct: COMBO_RATE_PCT,
        level_rate_pct: LEVEL_RATE_PCT,
        lines_per_level: LINES_PER_LEVEL,
        base_fall_ms: BASE_FALL_MS,
        speed_exponent: SPEED_EXPONENT,
        speed_scale: SPEED_SCALE,
        min_fall_ms: MIN_FALL_MS,
    };

    /// Milliseconds between gravity steps at `level`, never below the floor
    pub fn fall_interval_ms(&self, level: u32) -> u32 {
        let reduction = (level as f64).powf(self.speed_exponent) * self.speed_scale;
        let raw = self.base_fall_ms as f64 - reduction;
        if raw <= self.min_fall_ms as f64 {
            self.min_fall_ms
        } else {
            // Truncation toward zero, as the classic timer did.
            raw as u32
        }
    }

    /// Points for clearing `lines` rows on one lock
    ///
    /// `BASE * 2^(lines-1) * (1 + combo*rate) * (1 + level*rate)`, rounded down.
    pub fn score_for(&self, lines: u32, combo: u32, level: u32) -> u32 {
        if lines == 0 {
            return 0;
        }
        let base = (self.base_score as u64) << (lines - 1).min(32);
        let combo_pct = 100 + combo as u64 * self.combo_rate_pct as u64;
        let level_pct = 100 + level as u64 * self.level_rate_pct as u64;
        let total = base
            .saturating_mul(combo_pct)
            .saturating_mul(level_pct)
            / 10_000;
        total.min(u32::MAX as u64) as u32
    }

    /// Level reached after `total_lines` cleared lines (starts at 1)
    pub fn level_for(&self, total_lines: u32) -> u32 {
        total_lines / self.lines_per_level.max(1) + 1
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// [`ScoringPolicy::fall_interval_ms`] for the classic curve
pub fn fall_interval_ms(level: u32) -> u32 {
    ScoringPolicy::CLASSIC.fall_interval_ms(level)
}

/// [`ScoringPolicy::score_for`] for the classic curve
pub fn score_for(lines: u32, combo: u32, level: u32) -> u32 {
    ScoringPolicy::CLASSIC.score_for(lines, combo, level)
}

/// [`ScoringPolicy::level_for`] for the classic curve
pub fn level_for(total_lines: u32) -> u32 {
    ScoringPolicy::CLASSIC.level_for(total_lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores_double_per_row() {
        // Level 0, no combo: bare base values.
        assert_eq!(score_for(1, 0, 0), 100);
        assert_eq!(score_for(2, 0, 0), 200);
        assert_eq!(score_for(3, 0, 0), 400);
        assert_eq!(score_for(4, 0, 0), 800);
    }

    #[test]
    fn test_multipliers() {
        assert_eq!(score_for(1, 0, 1), 150);
        assert_eq!(score_for(4, 0, 1), 1200);
        assert_eq!(score_for(2, 3, 1), 480);
        // 100 * 1.2 * 1.5 = 180
        assert_eq!(score_for(1, 1, 1), 180);
        // 400 * 1.4 * 2.0 = 1120
        assert_eq!(score_for(3, 2, 2), 1120);
    }

    #[test]
    fn test_no_lines_no_points() {
        assert_eq!(score_for(0, 5, 9), 0);
    }

    #[test]
    fn test_score_rounds_down() {
        let policy = ScoringPolicy {
            combo_rate_pct: 33,
            ..ScoringPolicy::CLASSIC
        };
        // 100 * 1.33 * 1.0 = 133
        assert_eq!(policy.score_for(1, 1, 0), 133);
        // 100 * 1.33 * 1.5 = 199.5 -> 199
        assert_eq!(policy.score_for(1, 1, 1), 199);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(9), 1);
        assert_eq!(level_for(10), 2);
        assert_eq!(level_for(25), 3);
        assert_eq!(level_for(100), 11);
    }

    #[test]
    fn test_fall_intervals() {
        assert_eq!(fall_interval_ms(0), 800);
        assert_eq!(fall_interval_ms(1), 760);
        assert_eq!(fall_interval_ms(2), 708);
        assert_eq!(fall_interval_ms(10), 166);
        assert_eq!(fall_interval_ms(11), 100);
        assert_eq!(fall_interval_ms(50), 100); // Floor
    }

    #[test]
    fn test_fall_interval_is_non_increasing() {
        let mut prev = fall_interval_ms(1);
        for level in 2..40 {
            let next = fall_interval_ms(level);
            assert!(next <= prev);
            assert!(next >= MIN_FALL_MS);
            prev = next;
        }
    }
}
