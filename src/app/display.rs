//! Display intents and their 16x2 character-LCD rendering.
//!
//! The core never talks to the panel directly: it produces a
//! [`DisplayIntent`], and [`DisplayIntent::render`] lays it out as a
//! [`DisplayFrame`] of two fixed-width lines for the `DisplayPort`.

use core::fmt::{self, Write};

use heapless::String;

use crate::zones::ZONE_COUNT;

pub const LCD_COLS: usize = 16;
pub const LCD_ROWS: usize = 2;

const PRODUCT_BANNER: &str = "    WaterLin    ";
const WATERING_BANNER: &str = "    WATERING    ";
const STARTING_BANNER: &str = "STARTING";

/// What the panel should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayIntent {
    /// Boot splash.
    Starting,
    /// Idle product banner (menu state 0).
    Banner,
    /// All four moisture thresholds, in percent.
    Thresholds([u16; ZONE_COUNT]),
    /// All four watering durations, in minutes.
    Durations([u16; ZONE_COUNT]),
    /// An irrigation cycle is in progress.
    Watering,
    /// Calibration monitor: raw probe millivolts, `None` for a failed read.
    SensorReadings([Option<i32>; ZONE_COUNT]),
}

/// Two rendered LCD lines, each at most [`LCD_COLS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFrame {
    pub lines: [String<LCD_COLS>; LCD_ROWS],
}

impl DisplayFrame {
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map_or("", |l| l.as_str())
    }
}

/// `fmt::Write` adapter that silently drops whatever does not fit.
struct Clipped<'a>(&'a mut String<LCD_COLS>);

impl Write for Clipped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

struct Reading(Option<i32>);

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(mv) => fmt::Display::fmt(&mv, f),
            None => f.pad("--"),
        }
    }
}

impl DisplayIntent {
    pub fn render(&self) -> DisplayFrame {
        let mut frame = DisplayFrame::default();
        for (row, line) in frame.lines.iter_mut().enumerate() {
            let (a, b) = (row * 2, row * 2 + 1);
            let mut out = Clipped(line);
            // Writes into `Clipped` never fail.
            let _ = match self {
                Self::Starting => out.write_str(if row == 0 { STARTING_BANNER } else { "" }),
                Self::Banner => out.write_str(if row == 0 { PRODUCT_BANNER } else { "" }),
                Self::Watering => out.write_str(if row == 0 { WATERING_BANNER } else { "" }),
                Self::Thresholds(v) => write!(
                    out,
                    "R{}:{:<3}% R{}:{:<3}% ",
                    a + 1,
                    v[a],
                    b + 1,
                    v[b]
                ),
                Self::Durations(v) => {
                    write!(out, "T{}:{:<5}T{}:{:<5}", a + 1, v[a], b + 1, v[b])
                }
                Self::SensorReadings(v) => write!(
                    out,
                    "S{}:{:<5}S{}:{:<5}",
                    a + 1,
                    Reading(v[a]),
                    b + 1,
                    Reading(v[b])
                ),
            };
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_sits_on_the_top_line() {
        let frame = DisplayIntent::Banner.render();
        assert_eq!(frame.line(0), "    WaterLin    ");
        assert_eq!(frame.line(1), "");
        assert_eq!(DisplayIntent::Watering.render().line(0), "    WATERING    ");
        assert_eq!(DisplayIntent::Starting.render().line(0), "STARTING");
    }

    #[test]
    fn threshold_panel_layout() {
        let frame = DisplayIntent::Thresholds([5, 42, 100, 0]).render();
        assert_eq!(frame.line(0), "R1:5  % R2:42 % ");
        assert_eq!(frame.line(1), "R3:100% R4:0  % ");
    }

    #[test]
    fn duration_panel_layout() {
        let frame = DisplayIntent::Durations([1, 250, 12, 0]).render();
        assert_eq!(frame.line(0), "T1:1    T2:250  ");
        assert_eq!(frame.line(1), "T3:12   T4:0    ");
    }

    #[test]
    fn sensor_readings_mark_failed_probes() {
        let frame = DisplayIntent::SensorReadings([Some(1263), None, Some(0), Some(4999)]).render();
        assert_eq!(frame.line(0), "S1:1263 S2:--   ");
        assert_eq!(frame.line(1), "S3:0    S4:4999 ");
    }

    #[test]
    fn overlong_values_are_clipped_to_the_panel() {
        let frame = DisplayIntent::SensorReadings([Some(123_456_789), Some(1), None, None]).render();
        assert_eq!(frame.line(0).len(), LCD_COLS);
        assert!(frame.line(0).starts_with("S1:123456789"));
    }
}
