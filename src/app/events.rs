//! Outbound application events.
//!
//! The [`Controller`](super::service::Controller) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder, ...).

use crate::config::RunMode;
use crate::control::irrigation::CycleReport;
use crate::error::{Error, SensorError};
use crate::fsm::{MenuState, Setting};
use crate::zones::ZoneId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries the run mode).
    Started(RunMode),

    /// A button press moved the menu.
    MenuChanged { from: MenuState, to: MenuState },

    /// The knob wrote a new value into a threshold or duration.
    SettingChanged { setting: Setting, value: u16 },

    /// One zone was sampled by the dryness evaluator.
    ZoneSampled {
        zone: ZoneId,
        millivolts: i32,
        moisture_percent: i32,
        threshold_percent: u16,
        dry: bool,
    },

    /// A probe (`Some(zone)`) or the knob (`None`) produced no usable reading.
    SensorFault {
        zone: Option<ZoneId>,
        error: SensorError,
    },

    ValveOpened(ZoneId),

    /// Valve closed at the given elapsed-minute tick.
    ValveClosed { zone: ZoneId, minute: u16 },

    CycleCompleted(CycleReport),

    /// A valve write aborted the cycle.
    CycleFailed(Error),

    /// The day window elapsed; `carried_ms` is the overshoot kept for the next one.
    DayRolledOver { carried_ms: u64 },

    /// A non-fatal peripheral failure (display, safe-shutdown close).
    Fault(Error),
}
