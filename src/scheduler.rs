//! Day window accounting.
//!
//! The controller decides once per accumulated day whether to irrigate.
//! [`DayAccumulator`] counts elapsed milliseconds: one loop interval per
//! control-loop iteration plus every minute spent watering.  When the
//! count reaches the window length a cycle may start; afterwards exactly
//! one window is subtracted, so any overshoot carries into the next day.
//!
//! ```text
//!  elapsed ─┬─ +loop_interval_ms per iteration
//!           ├─ +watering_tick_ms per watering minute
//!           └─ −day_length_ms after each triggered cycle
//! ```

use log::info;

use crate::fsm::MenuState;

/// Elapsed-time counter against a fixed window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayAccumulator {
    elapsed_ms: u64,
    period_ms: u64,
}

impl DayAccumulator {
    /// Start an empty window of `period_ms`.
    pub const fn new(period_ms: u64) -> Self {
        Self {
            elapsed_ms: 0,
            period_ms,
        }
    }

    /// Window with time already on the clock.
    pub const fn with_elapsed(period_ms: u64, elapsed_ms: u64) -> Self {
        Self {
            elapsed_ms,
            period_ms,
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
    }

    pub const fn is_due(&self) -> bool {
        self.elapsed_ms >= self.period_ms
    }

    /// Subtract one window, keeping the overshoot.  Returns what was carried.
    pub fn roll_over(&mut self) -> u64 {
        self.elapsed_ms = self.elapsed_ms.saturating_sub(self.period_ms);
        info!("Day window rolled over ({} ms carried)", self.elapsed_ms);
        self.elapsed_ms
    }

    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Milliseconds until the window is due (0 when already due).
    pub const fn remaining_ms(&self) -> u64 {
        self.period_ms.saturating_sub(self.elapsed_ms)
    }
}

/// A cycle may start only while the menu is idle and the window has elapsed.
pub fn irrigation_due(menu: MenuState, day: &DayAccumulator) -> bool {
    menu == MenuState::Operate && day.is_due()
}
