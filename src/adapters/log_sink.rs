//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART / USB-CDC in production).  Each line starts
//! with a fixed tag so the serial stream can be grepped.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(mode) => {
                info!("START | mode={:?}", mode);
            }
            AppEvent::MenuChanged { from, to } => {
                info!("MENU  | {:?} -> {:?}", from, to);
            }
            AppEvent::SettingChanged { setting, value } => {
                info!("MENU  | {:?} = {}", setting, value);
            }
            AppEvent::ZoneSampled {
                zone,
                millivolts,
                moisture_percent,
                threshold_percent,
                dry,
            } => {
                info!(
                    "ZONE  | {} | {}mV -> {}% (limit {}%) | {}",
                    zone.number(),
                    millivolts,
                    moisture_percent,
                    threshold_percent,
                    if *dry { "DRY" } else { "ok" }
                );
            }
            AppEvent::SensorFault { zone, error } => match zone {
                Some(z) => warn!("FAULT | sensor {}: {}", z.number(), error),
                None => warn!("FAULT | knob: {}", error),
            },
            AppEvent::ValveOpened(zone) => {
                info!("VALVE | {} open", zone.number());
            }
            AppEvent::ValveClosed { zone, minute } => {
                info!("VALVE | {} closed at minute {}", zone.number(), minute);
            }
            AppEvent::CycleCompleted(report) => match serde_json::to_string(report) {
                Ok(json) => info!("CYCLE | {}", json),
                Err(_) => info!("CYCLE | {:?}", report),
            },
            AppEvent::CycleFailed(e) => {
                error!("CYCLE | aborted: {}", e);
            }
            AppEvent::DayRolledOver { carried_ms } => {
                info!("DAY   | rolled over, {}ms carried", carried_ms);
            }
            AppEvent::Fault(e) => {
                warn!("FAULT | {}", e);
            }
        }
    }
}
