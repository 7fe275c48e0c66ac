//! Mock hardware adapter for integration tests.
//!
//! Records every valve write, panel redraw and wait into one shared log
//! so tests can assert on the full command history, in order, without
//! touching real GPIO or ADC registers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use waterlin::app::display::DisplayFrame;
use waterlin::app::events::AppEvent;
use waterlin::app::ports::{
    ButtonEvent, ButtonPort, DisplayPort, EventSink, SensorPort, ValvePort, ValveState,
};
use waterlin::error::{ActuatorError, SensorError};
use waterlin::zones::{ZONE_COUNT, ZoneId};

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Valve(usize, ValveState),
    Show(String, String),
    Wait(u32),
}

pub type CallLog = Rc<RefCell<Vec<HwCall>>>;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub log: CallLog,
    pub probe_mv: [Result<i32, SensorError>; ZONE_COUNT],
    pub knob: Result<f32, SensorError>,
    /// One entry consumed per poll; `true` = press.  Empty = idle.
    pub presses: VecDeque<bool>,
    pub fail_valve: Option<(usize, ValveState)>,
    pub fail_display: bool,
    pub open: [bool; ZONE_COUNT],
}

#[allow(dead_code)]
impl MockHardware {
    /// All probes read wet (1000 mV), knob centred.
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            probe_mv: [Ok(1000); ZONE_COUNT],
            knob: Ok(0.5),
            presses: VecDeque::new(),
            fail_valve: None,
            fail_display: false,
            open: [false; ZONE_COUNT],
        }
    }

    pub fn press_next(&mut self, count: usize) {
        self.presses.extend(std::iter::repeat_n(true, count));
    }

    pub fn calls(&self) -> Vec<HwCall> {
        self.log.borrow().clone()
    }

    pub fn valve_calls(&self) -> Vec<(usize, ValveState)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HwCall::Valve(z, s) => Some((*z, *s)),
                _ => None,
            })
            .collect()
    }

    pub fn shown(&self) -> Vec<(String, String)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|c| match c {
                HwCall::Show(a, b) => Some((a.clone(), b.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

impl SensorPort for MockHardware {
    fn read_raw_millivolts(&mut self, zone: ZoneId) -> Result<i32, SensorError> {
        self.probe_mv[zone.index()]
    }

    fn read_knob_ratio(&mut self) -> Result<f32, SensorError> {
        self.knob
    }
}

impl ValvePort for MockHardware {
    fn set_valve(&mut self, zone: ZoneId, state: ValveState) -> Result<(), ActuatorError> {
        if self.fail_valve == Some((zone.index(), state)) {
            return Err(ActuatorError::ValveWriteFailed(zone));
        }
        self.open[zone.index()] = state == ValveState::Open;
        self.log.borrow_mut().push(HwCall::Valve(zone.index(), state));
        Ok(())
    }
}

impl ButtonPort for MockHardware {
    fn poll_button(&mut self) -> ButtonEvent {
        match self.presses.pop_front() {
            Some(true) => ButtonEvent::Pressed,
            _ => ButtonEvent::Idle,
        }
    }
}

impl DisplayPort for MockHardware {
    fn show(&mut self, frame: &DisplayFrame) -> Result<(), ActuatorError> {
        if self.fail_display {
            return Err(ActuatorError::DisplayWriteFailed);
        }
        self.log.borrow_mut().push(HwCall::Show(
            frame.line(0).to_string(),
            frame.line(1).to_string(),
        ));
        Ok(())
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Records millisecond waits into the shared log; never sleeps.
pub struct MockDelay {
    pub log: CallLog,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().push(HwCall::Wait(ms));
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// Hardware, delay and sink sharing one call log.
pub fn rig() -> (MockHardware, MockDelay, RecordingSink) {
    let log: CallLog = Rc::new(RefCell::new(Vec::new()));
    (
        MockHardware::new(log.clone()),
        MockDelay { log },
        RecordingSink::default(),
    )
}
