//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the probe array, valve bank, button and LCD, exposing them through
//! [`SensorPort`], [`ValvePort`], [`ButtonPort`] and [`DisplayPort`].
//! This is the only module in the system that touches actual hardware.
//! On non-espidf targets the ADC is backed by the `hw_init` simulation.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::adapters::time::Uptime;
use crate::app::display::DisplayFrame;
use crate::app::ports::{
    ButtonEvent, ButtonPort, DisplayPort, SensorPort, ValvePort, ValveState,
};
use crate::drivers::button::ButtonDriver;
use crate::drivers::lcd::Lcd;
use crate::drivers::valve::ValveBank;
use crate::error::{ActuatorError, SensorError};
use crate::sensors::ProbeArray;
use crate::zones::ZoneId;

/// Concrete adapter that combines all hardware behind port traits.
///
/// `P` is the push-pull output pin type shared by mux, valves and LCD;
/// `B` the button input; `D` the blocking delay used for settle times.
pub struct HardwareAdapter<P: OutputPin, B: InputPin, D: DelayNs> {
    probes: ProbeArray<P>,
    valves: ValveBank<P>,
    button: ButtonDriver<B>,
    lcd: Lcd<P, D>,
    delay: D,
    clock: Uptime,
}

impl<P: OutputPin, B: InputPin, D: DelayNs> HardwareAdapter<P, B, D> {
    pub fn new(
        probes: ProbeArray<P>,
        valves: ValveBank<P>,
        button: ButtonDriver<B>,
        lcd: Lcd<P, D>,
        delay: D,
    ) -> Self {
        Self {
            probes,
            valves,
            button,
            lcd,
            delay,
            clock: Uptime::new(),
        }
    }

    pub fn valve_state(&self, zone: ZoneId) -> ValveState {
        self.valves.state(zone)
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: OutputPin, B: InputPin, D: DelayNs> SensorPort for HardwareAdapter<P, B, D> {
    fn read_raw_millivolts(&mut self, zone: ZoneId) -> Result<i32, SensorError> {
        self.probes.read_zone_mv(zone, &mut self.delay)
    }

    fn read_knob_ratio(&mut self) -> Result<f32, SensorError> {
        self.probes.read_knob_ratio(&mut self.delay)
    }
}

// ── ValvePort implementation ──────────────────────────────────

impl<P: OutputPin, B: InputPin, D: DelayNs> ValvePort for HardwareAdapter<P, B, D> {
    fn set_valve(&mut self, zone: ZoneId, state: ValveState) -> Result<(), ActuatorError> {
        self.valves.set(zone, state)
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<P: OutputPin, B: InputPin, D: DelayNs> ButtonPort for HardwareAdapter<P, B, D> {
    fn poll_button(&mut self) -> ButtonEvent {
        self.button.poll(self.clock.now_ms())
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl<P: OutputPin, B: InputPin, D: DelayNs> DisplayPort for HardwareAdapter<P, B, D> {
    fn show(&mut self, frame: &DisplayFrame) -> Result<(), ActuatorError> {
        self.lcd.draw(frame)
    }
}
