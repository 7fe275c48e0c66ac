//! Menu state table and the two edit handlers.
//!
//! Each state is one row of plain data plus an optional `fn` pointer.
//! Threshold states share `edit_threshold`, duration states share
//! `edit_duration`; the row's `zone` tells the handler which zone to write.
//!
//! ```text
//!  Operate ─▶ T1 ─▶ T2 ─▶ T3 ─▶ T4 ─▶ D1 ─▶ D2 ─▶ D3 ─▶ D4 ─┐
//!     ▲                                                    │
//!     └────────────────────── press ───────────────────────┘
//! ```

use log::trace;

use super::context::MenuContext;
use super::{MenuState, Panel, StateDescriptor};
use crate::zones::ZoneId;

const THRESHOLD_NAMES: [&str; 4] = ["Threshold 1", "Threshold 2", "Threshold 3", "Threshold 4"];
const DURATION_NAMES: [&str; 4] = ["Duration 1", "Duration 2", "Duration 3", "Duration 4"];

/// Build the state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; MenuState::COUNT] {
    core::array::from_fn(|idx| {
        let id = MenuState::from_index(idx);
        match idx {
            0 => StateDescriptor {
                id,
                name: "Operate",
                zone: None,
                panel: Panel::Banner,
                on_update: None,
            },
            1..=4 => StateDescriptor {
                id,
                name: THRESHOLD_NAMES[idx - 1],
                zone: ZoneId::new(idx - 1),
                panel: Panel::Thresholds,
                on_update: Some(edit_threshold),
            },
            _ => StateDescriptor {
                id,
                name: DURATION_NAMES[idx - 5],
                zone: ZoneId::new(idx - 5),
                panel: Panel::Durations,
                on_update: Some(edit_duration),
            },
        }
    })
}

fn edit_threshold(ctx: &mut MenuContext<'_>) -> u16 {
    let value = ctx.knob.threshold_percent();
    ctx.zones.get_mut(ctx.zone).threshold_percent = value;
    trace!("{} threshold <- {}%", ctx.zone, value);
    value
}

fn edit_duration(ctx: &mut MenuContext<'_>) -> u16 {
    let value = ctx.knob.duration_min(ctx.duration_scale_percent);
    ctx.zones.get_mut(ctx.zone).duration_min = value;
    trace!("{} duration <- {} min", ctx.zone, value);
    value
}
