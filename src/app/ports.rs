//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Controller (domain)
//! ```
//!
//! Driven adapters (probes, valves, button, display, event sinks) implement
//! these traits.  The [`Controller`](super::service::Controller) consumes
//! them via generics, so the domain core never touches hardware directly.
//! Timed waits go through [`embedded_hal::delay::DelayNs`].
//!
//! Every call is blocking and issued from the single control loop; no two
//! peripheral calls are ever in flight at once.

use log::warn;

use crate::app::display::DisplayFrame;
use crate::error::{ActuatorError, SensorError};
use crate::zones::ZoneId;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the analog inputs behind the multiplexer.
pub trait SensorPort {
    /// Select the zone's probe channel and return one conversion in millivolts.
    fn read_raw_millivolts(&mut self, zone: ZoneId) -> Result<i32, SensorError>;

    /// Read the knob channel as a fraction of full scale.  Noise may push
    /// the value slightly outside `0.0..=1.0`; callers clamp.
    fn read_knob_ratio(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Valve port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValveState {
    Open,
    Closed,
}

/// Write-side port for the four solenoid valves.
pub trait ValvePort {
    fn set_valve(&mut self, zone: ZoneId, state: ValveState) -> Result<(), ActuatorError>;

    /// Close every valve for safe shutdown.  Attempts all zones even if one
    /// fails and reports the first failure.
    fn close_all(&mut self) -> Result<(), ActuatorError> {
        let mut first_err = None;
        for zone in ZoneId::ALL {
            if let Err(e) = self.set_valve(zone, ValveState::Closed) {
                warn!("close_all: {} failed: {}", zone, e);
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

// ───────────────────────────────────────────────────────────────
// Button port
// ───────────────────────────────────────────────────────────────

/// Debounced, edge-triggered push-button result for one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// A new physical press was accepted since the last poll.
    Pressed,
    Idle,
}

pub trait ButtonPort {
    fn poll_button(&mut self) -> ButtonEvent;
}

// ───────────────────────────────────────────────────────────────
// Display port
// ───────────────────────────────────────────────────────────────

/// Presentation only; nothing read back from the display feeds control.
pub trait DisplayPort {
    fn show(&mut self, frame: &DisplayFrame) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
