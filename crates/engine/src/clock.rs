//! Fall clock - turns wall-clock time into gravity ticks

/// Accumulates elapsed milliseconds and reports how many fall periods passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallClock {
    interval_ms: u32,
    elapsed_ms: u32,
}

impl FallClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time accumulated toward the next tick
    pub fn pending_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Change the period; time already accumulated is kept
    pub fn set_interval(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
    }

    /// Start a fresh period
    pub fn restart(&mut self) {
        self.elapsed_ms = 0;
    }

    /// Add `elapsed_ms` and return the number of whole periods that completed
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let ticks = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        ticks
    }

    /// Milliseconds until the next tick is due
    pub fn until_next_ms(&self) -> u32 {
        self.interval_ms - self.elapsed_ms
    }
}

impl Default for FallClock {
    fn default() -> Self {
        Self::new(blockfall_core::fall_interval_ms(1))
    }
}
