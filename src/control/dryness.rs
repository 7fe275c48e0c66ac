//! Dryness evaluator.
//!
//! Samples every zone in index order through the calibration engine and
//! compares the estimate against that zone's threshold.  A zone whose
//! probe gives no estimate is left not dry for this pass.

use log::{debug, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, SensorPort};
use crate::control::calibration::estimate_moisture;
use crate::zones::{DryFlags, ZoneId, ZoneTable};

/// `true` when the estimate is strictly below the threshold.
pub fn is_dry(moisture_percent: i32, threshold_percent: u16) -> bool {
    moisture_percent < i32::from(threshold_percent)
}

/// Recompute every zone's dryness flag and return the new set.
pub fn evaluate_all(
    sensors: &mut impl SensorPort,
    zones: &mut ZoneTable,
    sink: &mut impl EventSink,
) -> DryFlags {
    for id in ZoneId::ALL {
        let zone = zones.get_mut(id);
        zone.dry = match estimate_moisture(sensors, id, &zone.calibration) {
            Ok(sample) => {
                let dry = is_dry(sample.moisture_percent, zone.threshold_percent);
                debug!(
                    "{}: {} mV -> {}% (limit {}%) dry={}",
                    id, sample.millivolts, sample.moisture_percent, zone.threshold_percent, dry
                );
                sink.emit(&AppEvent::ZoneSampled {
                    zone: id,
                    millivolts: sample.millivolts,
                    moisture_percent: sample.moisture_percent,
                    threshold_percent: zone.threshold_percent,
                    dry,
                });
                dry
            }
            Err(error) => {
                warn!("{}: no moisture estimate ({})", id, error);
                sink.emit(&AppEvent::SensorFault {
                    zone: Some(id),
                    error,
                });
                false
            }
        };
    }
    zones.dry_flags()
}
