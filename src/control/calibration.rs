//! Calibration engine: probe millivolts → volumetric water content.
//!
//! Each probe has a two-parameter fit collected in sensor-calibration
//! mode.  The model is inverse in voltage:
//!
//! ```text
//! moisture % = slope · 100 000 / mV + intercept · 100
//! ```
//!
//! The result is truncated toward zero.  A reading of zero or fewer
//! millivolts has no estimate and is reported as
//! [`SensorError::NonPositiveVoltage`].

use serde::{Deserialize, Serialize};

use crate::app::ports::SensorPort;
use crate::error::SensorError;
use crate::zones::ZoneId;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationModel {
    pub slope: f32,
    pub intercept: f32,
}

impl CalibrationModel {
    pub const fn new(slope: f32, intercept: f32) -> Self {
        Self { slope, intercept }
    }

    /// Estimated moisture for one reading.  No retry, no plausibility
    /// check beyond the sign of the voltage.
    pub fn moisture_percent(&self, millivolts: i32) -> Result<i32, SensorError> {
        if millivolts <= 0 {
            return Err(SensorError::NonPositiveVoltage { millivolts });
        }
        let estimate = self.slope * 100_000.0 / millivolts as f32 + self.intercept * 100.0;
        Ok(estimate as i32)
    }
}

/// One probe sample with its derived estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoistureSample {
    pub millivolts: i32,
    pub moisture_percent: i32,
}

/// Read the zone's probe once (blocking) and apply its model.
pub fn estimate_moisture(
    sensors: &mut impl SensorPort,
    zone: ZoneId,
    model: &CalibrationModel,
) -> Result<MoistureSample, SensorError> {
    let millivolts = sensors.read_raw_millivolts(zone)?;
    let moisture_percent = model.moisture_percent(millivolts)?;
    Ok(MoistureSample {
        millivolts,
        moisture_percent,
    })
}
