//! Data handed to a menu state's update handler.
//!
//! `MenuContext` borrows the zone table for exactly one handler call; the
//! handler writes the knob value into the selected zone and returns it.

use crate::zones::{ZoneId, ZoneTable};

// ---------------------------------------------------------------------------
// Knob sample
// ---------------------------------------------------------------------------

/// Knob position as a whole percentage of travel (0–100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnobSample {
    percent: u16,
}

impl KnobSample {
    /// Quantise a `[0, 1]` travel ratio.  Out-of-range ratios are clamped
    /// and NaN reads as fully counter-clockwise.  Truncates toward zero.
    pub fn from_ratio(ratio: f32) -> Self {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        Self {
            percent: (ratio * 100.0) as u16,
        }
    }

    pub const fn from_percent(percent: u16) -> Self {
        Self {
            percent: if percent > 100 { 100 } else { percent },
        }
    }

    pub const fn percent(self) -> u16 {
        self.percent
    }

    /// Value written into a threshold setting.
    pub const fn threshold_percent(self) -> u16 {
        self.percent
    }

    /// Value written into a duration setting: `percent * scale / 100`
    /// minutes in integer arithmetic.
    pub fn duration_min(self, scale_percent: u16) -> u16 {
        let minutes = u32::from(self.percent) * u32::from(scale_percent) / 100;
        u16::try_from(minutes).unwrap_or(u16::MAX)
    }
}

// ---------------------------------------------------------------------------
// MenuContext
// ---------------------------------------------------------------------------

pub struct MenuContext<'a> {
    pub zones: &'a mut ZoneTable,
    /// Zone the current state edits.
    pub zone: ZoneId,
    pub knob: KnobSample,
    /// Knob full travel maps to this many minutes.
    pub duration_scale_percent: u16,
}
