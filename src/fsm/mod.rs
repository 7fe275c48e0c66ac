//! Table-driven configuration menu state machine.
//!
//! Classic embedded FSM pattern: one static descriptor per state, indexed
//! by the state's discriminant.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  StateTable                                                   │
//! │  ┌──────────────┬──────────┬─────────────┬─────────────────┐  │
//! │  │ MenuState    │ zone     │ panel       │ on_update       │  │
//! │  ├──────────────┼──────────┼─────────────┼─────────────────┤  │
//! │  │ Operate      │ -        │ Banner      │ -               │  │
//! │  │ Threshold1-4 │ 0..3     │ Thresholds  │ edit_threshold  │  │
//! │  │ Duration1-4  │ 0..3     │ Durations   │ edit_duration   │  │
//! │  └──────────────┴──────────┴─────────────┴─────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every tick the engine polls the button once; a press advances the
//! state by one, wrapping from `Duration4` back to `Operate`.  In any
//! editing state the knob is sampled and the state's `on_update` writes
//! it into the selected zone.  The returned [`DisplayIntent`] depends on
//! both the state and the sample just written (Mealy machine).

pub mod context;
pub mod states;

use log::{info, warn};

use crate::app::display::DisplayIntent;
use crate::app::events::AppEvent;
use crate::app::ports::{ButtonEvent, ButtonPort, EventSink, SensorPort};
use crate::zones::{ZoneId, ZoneTable};
use context::{KnobSample, MenuContext};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Every menu mode.  Must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MenuState {
    Operate = 0,
    Threshold1 = 1,
    Threshold2 = 2,
    Threshold3 = 3,
    Threshold4 = 4,
    Duration1 = 5,
    Duration2 = 6,
    Duration3 = 7,
    Duration4 = 8,
}

impl MenuState {
    /// Total number of states; sizes the table array.
    pub const COUNT: usize = 9;

    /// Convert an index back to `MenuState`.  Out-of-range indices are a
    /// bug; debug builds assert, release builds fall back to `Operate`.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Operate,
            1 => Self::Threshold1,
            2 => Self::Threshold2,
            3 => Self::Threshold3,
            4 => Self::Threshold4,
            5 => Self::Duration1,
            6 => Self::Duration2,
            7 => Self::Duration3,
            8 => Self::Duration4,
            _ => {
                debug_assert!(false, "invalid menu index: {idx}");
                Self::Operate
            }
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Transition on a button press.
    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % Self::COUNT)
    }

    pub const fn is_editing(self) -> bool {
        !matches!(self, Self::Operate)
    }

    /// The value this state edits, if any.
    pub fn setting(self) -> Option<Setting> {
        let idx = self.index();
        match idx {
            1..=4 => ZoneId::new(idx - 1).map(Setting::Threshold),
            5..=8 => ZoneId::new(idx - 5).map(Setting::Duration),
            _ => None,
        }
    }
}

/// One operator-editable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Threshold(ZoneId),
    Duration(ZoneId),
}

/// Which panel a state shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Banner,
    Thresholds,
    Durations,
}

impl Panel {
    /// Render-ready intent using the zone values after this tick's write.
    pub fn intent(self, zones: &ZoneTable) -> DisplayIntent {
        match self {
            Self::Banner => DisplayIntent::Banner,
            Self::Thresholds => DisplayIntent::Thresholds(zones.thresholds()),
            Self::Durations => DisplayIntent::Durations(zones.durations()),
        }
    }
}

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Per-tick handler for an editing state.  Writes `ctx.knob` into the
/// zone named by `ctx.zone` and reports the written value.
pub type StateUpdateFn = fn(&mut MenuContext<'_>) -> u16;

/// Static descriptor for a single menu state.
pub struct StateDescriptor {
    pub id: MenuState,
    pub name: &'static str,
    pub zone: Option<ZoneId>,
    pub panel: Panel,
    pub on_update: Option<StateUpdateFn>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The menu engine.  Sole owner of the current menu state.
pub struct MenuFsm {
    table: [StateDescriptor; MenuState::COUNT],
    current: usize,
    duration_scale_percent: u16,
}

impl MenuFsm {
    /// Start in `Operate`.
    pub fn new(duration_scale_percent: u16) -> Self {
        Self {
            table: states::build_state_table(),
            current: MenuState::Operate.index(),
            duration_scale_percent,
        }
    }

    pub fn current_state(&self) -> MenuState {
        MenuState::from_index(self.current)
    }

    /// Advance by one press.  Returns `(from, to)`.
    pub fn press(&mut self) -> (MenuState, MenuState) {
        let from = self.current_state();
        let to = from.next();
        info!(
            "Menu: {} -> {}",
            self.table[from.index()].name,
            self.table[to.index()].name
        );
        self.current = to.index();
        (from, to)
    }

    /// Write an already-sampled knob value through the current state's
    /// handler.  Returns the changed setting and value, or `None` when the
    /// state edits nothing or the value did not change.
    pub fn apply_knob(&mut self, knob: KnobSample, zones: &mut ZoneTable) -> Option<(Setting, u16)> {
        let desc = &self.table[self.current];
        let (update, zone) = (desc.on_update?, desc.zone?);
        let setting = desc.id.setting()?;

        let before = match setting {
            Setting::Threshold(z) => zones.get(z).threshold_percent,
            Setting::Duration(z) => zones.get(z).duration_min,
        };
        let mut ctx = MenuContext {
            zones,
            zone,
            knob,
            duration_scale_percent: self.duration_scale_percent,
        };
        let written = update(&mut ctx);
        (written != before).then_some((setting, written))
    }

    /// One menu tick: poll the button, sample the knob when editing, write
    /// the value, and return what the display should show.
    pub fn tick<H>(&mut self, hw: &mut H, zones: &mut ZoneTable, sink: &mut impl EventSink) -> DisplayIntent
    where
        H: ButtonPort + SensorPort,
    {
        if hw.poll_button() == ButtonEvent::Pressed {
            let (from, to) = self.press();
            sink.emit(&AppEvent::MenuChanged { from, to });
        }

        if self.current_state().is_editing() {
            match hw.read_knob_ratio() {
                Ok(ratio) => {
                    if let Some((setting, value)) = self.apply_knob(KnobSample::from_ratio(ratio), zones) {
                        sink.emit(&AppEvent::SettingChanged { setting, value });
                    }
                }
                Err(error) => {
                    warn!("Menu: knob read failed ({}), keeping current value", error);
                    sink.emit(&AppEvent::SensorFault { zone: None, error });
                }
            }
        }

        self.table[self.current].panel.intent(zones)
    }
}
