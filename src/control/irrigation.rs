//! Irrigation actuator.
//!
//! Opens every dry zone's valve up front, then walks elapsed-minute ticks
//! `t = 0..=max_duration`.  At each tick any zone still open whose
//! duration is `<= t` is closed and its dryness flag cleared.  One
//! watering tick is waited between consecutive ticks and counted into
//! the day window.
//!
//! ```text
//!  t=0        t=1        t=2   ...   t=max
//!  open all ─┬─ wait ─┬─ wait ─ ... ─┤
//!  close d≤0 │ close d≤1 │ close d≤2   close rest
//! ```
//!
//! Timing is open loop: moisture is not re-sampled while watering.  A
//! failed valve write ends the cycle immediately with the error.

use embedded_hal::delay::DelayNs;
use log::{debug, info};
use serde::Serialize;

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, ValvePort, ValveState};
use crate::error::ActuatorError;
use crate::scheduler::DayAccumulator;
use crate::zones::{DryFlags, ZoneId, ZoneTable};

/// Summary of one completed watering cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CycleReport {
    /// Zones whose valves were opened.
    pub zones_watered: DryFlags,
    /// Watering ticks waited (each one `watering_tick_ms`).
    pub minutes: u16,
}

/// Water every zone currently flagged dry.
///
/// With no dry zones this returns immediately: no valve writes, no waits.
/// Minute waits run only between ticks, so a cycle waits `max(duration)`
/// minutes in total, with no trailing wait after the last valve closes.
pub fn run_cycle<V, D, S>(
    valves: &mut V,
    delay: &mut D,
    zones: &mut ZoneTable,
    day: &mut DayAccumulator,
    tick_ms: u32,
    sink: &mut S,
) -> Result<CycleReport, ActuatorError>
where
    V: ValvePort,
    D: DelayNs,
    S: EventSink,
{
    let watering = zones.dry_flags();
    if !watering.any() {
        return Ok(CycleReport::default());
    }

    for zone in watering.zones() {
        valves.set_valve(zone, ValveState::Open)?;
        sink.emit(&AppEvent::ValveOpened(zone));
    }

    let max_duration = watering
        .zones()
        .iter()
        .map(|&z| zones.get(z).duration_min)
        .max()
        .unwrap_or(0);
    info!(
        "Watering {} zone(s) for up to {} min",
        watering.count(),
        max_duration
    );

    let mut minutes = 0;
    for t in 0..=max_duration {
        for id in ZoneId::ALL {
            let zone = zones.get(id);
            if zone.dry && zone.duration_min <= t {
                valves.set_valve(id, ValveState::Closed)?;
                zones.get_mut(id).dry = false;
                debug!("{} closed at minute {}", id, t);
                sink.emit(&AppEvent::ValveClosed { zone: id, minute: t });
            }
        }

        if t < max_duration {
            delay.delay_ms(tick_ms);
            day.advance(u64::from(tick_ms));
            minutes += 1;
        }
    }

    Ok(CycleReport {
        zones_watered: watering,
        minutes,
    })
}
