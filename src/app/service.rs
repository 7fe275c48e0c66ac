//! Application service: the hexagonal core.
//!
//! [`Controller`] owns the zone table, the menu state machine and the day
//! accumulator, and is their only writer.  All I/O flows through port
//! traits injected at call sites, so the whole loop runs against mock
//! adapters on the host.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  ButtonPort ──▶ │        Controller        │
//!   ValvePort ◀── │  Menu · Dryness · Cycle  │ ──▶ DisplayPort
//!                 └──────────────────────────┘
//! ```
//!
//! One [`tick`](Controller::tick) is one scheduler iteration: menu, then
//! display, then (when a day has accumulated and the menu is idle) the
//! dryness pass and watering cycle, then the loop pause.

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::config::{RunMode, SystemConfig};
use crate::control::dryness::evaluate_all;
use crate::control::irrigation::run_cycle;
use crate::error::{Error, Result};
use crate::fsm::{MenuFsm, MenuState};
use crate::scheduler::{DayAccumulator, irrigation_due};
use crate::zones::{ZONE_COUNT, ZoneId, ZoneTable};

use super::display::DisplayIntent;
use super::events::AppEvent;
use super::ports::{ButtonPort, DisplayPort, EventSink, SensorPort, ValvePort};

// ───────────────────────────────────────────────────────────────
// Controller
// ───────────────────────────────────────────────────────────────

pub struct Controller {
    config: SystemConfig,
    zones: ZoneTable,
    menu: MenuFsm,
    day: DayAccumulator,
    /// Last intent drawn; the panel is only rewritten when this changes.
    last_intent: Option<DisplayIntent>,
}

impl Controller {
    /// Build the controller from a validated configuration.
    pub fn new(config: SystemConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            zones: ZoneTable::from_config(&config),
            menu: MenuFsm::new(config.duration_scale_percent),
            day: DayAccumulator::new(config.day_length_ms),
            last_intent: None,
            config,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the boot banner for `startup_banner_ms`.  Not counted toward
    /// the day window.
    pub fn start<D, S>(&mut self, display: &mut impl DisplayPort, delay: &mut D, sink: &mut S)
    where
        D: DelayNs,
        S: EventSink,
    {
        info!(
            "WaterLin starting in {:?} mode, first irrigation check in {} ms",
            self.config.run_mode,
            self.day.remaining_ms()
        );
        sink.emit(&AppEvent::Started(self.config.run_mode));
        self.refresh_display(display, DisplayIntent::Starting, sink);
        delay.delay_ms(self.config.startup_banner_ms);
    }

    /// Start, then loop forever in the configured run mode.
    pub fn run_forever<H, D, S>(mut self, hw: &mut H, delay: &mut D, sink: &mut S) -> !
    where
        H: SensorPort + ValvePort + ButtonPort + DisplayPort,
        D: DelayNs,
        S: EventSink,
    {
        self.start(hw, delay, sink);
        match self.config.run_mode {
            RunMode::Operate => loop {
                self.tick(hw, delay, sink);
            },
            RunMode::SensorCalibration => loop {
                self.calibration_tick(hw, delay, sink);
            },
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One scheduler iteration in operate mode.
    ///
    /// `hw` satisfies every hardware port at once; this avoids handing
    /// out several mutable borrows of the same peripheral set.
    pub fn tick<H, D, S>(&mut self, hw: &mut H, delay: &mut D, sink: &mut S)
    where
        H: SensorPort + ValvePort + ButtonPort + DisplayPort,
        D: DelayNs,
        S: EventSink,
    {
        // 1. Menu: button, knob, settings write
        let intent = self.menu.tick(hw, &mut self.zones, sink);

        // 2. Panel
        self.refresh_display(hw, intent, sink);

        // 3. Daily irrigation decision
        if irrigation_due(self.menu.current_state(), &self.day) {
            self.irrigate(hw, delay, sink);
        }

        // 4. Loop pause, counted toward the day
        let interval = self.config.loop_interval_ms;
        self.day.advance(u64::from(interval));
        delay.delay_ms(interval);
    }

    /// One refresh of the sensor-calibration monitor.  No valve is touched
    /// and the menu is not polled.
    pub fn calibration_tick<H, D, S>(&mut self, hw: &mut H, delay: &mut D, sink: &mut S)
    where
        H: SensorPort + DisplayPort,
        D: DelayNs,
        S: EventSink,
    {
        let mut readings = [None; ZONE_COUNT];
        for id in ZoneId::ALL {
            match hw.read_raw_millivolts(id) {
                Ok(mv) => readings[id.index()] = Some(mv),
                Err(error) => {
                    warn!("Calibration: {} read failed ({})", id, error);
                    sink.emit(&AppEvent::SensorFault {
                        zone: Some(id),
                        error,
                    });
                }
            }
        }
        debug!("Calibration readings: {:?}", readings);
        self.refresh_display(hw, DisplayIntent::SensorReadings(readings), sink);
        delay.delay_ms(self.config.calibration_refresh_ms);
    }

    /// Evaluate dryness and water what is dry, then close the day window.
    fn irrigate<H, D, S>(&mut self, hw: &mut H, delay: &mut D, sink: &mut S)
    where
        H: SensorPort + ValvePort + DisplayPort,
        D: DelayNs,
        S: EventSink,
    {
        let dry = evaluate_all(hw, &mut self.zones, sink);

        if dry.any() {
            self.refresh_display(hw, DisplayIntent::Watering, sink);
            let outcome = run_cycle(
                hw,
                delay,
                &mut self.zones,
                &mut self.day,
                self.config.watering_tick_ms,
                sink,
            );
            // Menu panel is redrawn on the next tick.
            self.last_intent = None;

            match outcome {
                Ok(report) => {
                    info!("Cycle complete: {} min", report.minutes);
                    sink.emit(&AppEvent::CycleCompleted(report));
                }
                Err(e) => {
                    error!("Cycle aborted: {}", e);
                    sink.emit(&AppEvent::CycleFailed(Error::from(e)));
                    if let Err(close_err) = hw.close_all() {
                        sink.emit(&AppEvent::Fault(Error::from(close_err)));
                    }
                    self.zones.clear_dry();
                }
            }
        } else {
            debug!("No zone dry; skipping cycle");
        }

        let carried_ms = self.day.roll_over();
        sink.emit(&AppEvent::DayRolledOver { carried_ms });
    }

    /// Draw `intent` unless it is already on the panel.  A failed write is
    /// reported and otherwise ignored.
    fn refresh_display(
        &mut self,
        display: &mut impl DisplayPort,
        intent: DisplayIntent,
        sink: &mut impl EventSink,
    ) {
        if self.last_intent.as_ref() == Some(&intent) {
            return;
        }
        match display.show(&intent.render()) {
            Ok(()) => self.last_intent = Some(intent),
            Err(e) => {
                warn!("Display write failed: {}", e);
                sink.emit(&AppEvent::Fault(Error::from(e)));
                self.last_intent = None;
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu.current_state()
    }

    pub fn day(&self) -> &DayAccumulator {
        &self.day
    }

    /// Test and bring-up hook, e.g. to start a run near the end of a day.
    pub fn day_mut(&mut self) -> &mut DayAccumulator {
        &mut self.day
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }
}
