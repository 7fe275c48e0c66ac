//! System configuration parameters
//!
//! All tunable parameters for the WaterLin controller.  Values are fixed
//! at build time; thresholds and durations can be retuned from the knob
//! menu at runtime but are not persisted across power loss.

use serde::{Deserialize, Serialize};

use crate::control::calibration::CalibrationModel;
use crate::error::{Error, Result};
use crate::zones::ZONE_COUNT;

/// Per-zone build-time parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Linear fit for this zone's probe.
    pub calibration: CalibrationModel,
    /// Initial dryness threshold (volumetric water content, %).
    pub threshold_percent: u16,
    /// Initial watering duration (minutes).
    pub duration_min: u16,
}

/// What the main loop does after boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunMode {
    /// Normal irrigation control with the knob menu.
    #[default]
    Operate,
    /// Show raw probe millivolts continuously; used to fit calibrations.
    SensorCalibration,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Zones ---
    pub zones: [ZoneConfig; ZONE_COUNT],
    pub run_mode: RunMode,

    // --- Timing ---
    /// Length of the irrigation decision window (milliseconds)
    pub day_length_ms: u64,
    /// Pause at the end of every control-loop iteration (milliseconds)
    pub loop_interval_ms: u32,
    /// One watering tick, i.e. one minute (milliseconds)
    pub watering_tick_ms: u32,
    /// How long the boot banner stays up (milliseconds)
    pub startup_banner_ms: u32,
    /// Refresh period of the calibration monitor (milliseconds)
    pub calibration_refresh_ms: u32,

    // --- Knob ---
    /// Knob voltage that reads as 100 % (millivolts)
    pub knob_full_scale_mv: u16,
    /// Knob percent → minutes factor, in percent (250 = ×2.5)
    pub duration_scale_percent: u16,

    // --- ADC front end ---
    /// Voltage at the analog front end for a full-scale conversion (millivolts)
    pub adc_full_scale_mv: u16,
    /// Raw counts of a full-scale conversion (12-bit)
    pub adc_max_counts: u16,

    // --- Button ---
    /// Minimum stable low time before a press is accepted (milliseconds)
    pub button_debounce_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        const fn zone(slope: f32, intercept: f32) -> ZoneConfig {
            ZoneConfig {
                calibration: CalibrationModel::new(slope, intercept),
                threshold_percent: 5,
                duration_min: 1,
            }
        }

        Self {
            // Probe fits collected in sensor-calibration mode
            zones: [
                zone(5.508, -4.328),
                zone(8.168, -6.264),
                zone(6.152, -4.684),
                zone(5.947, -4.455),
            ],
            run_mode: RunMode::Operate,

            // Timing
            day_length_ms: 24 * 60 * 60 * 1000,
            loop_interval_ms: 1,
            watering_tick_ms: 60 * 1000,
            startup_banner_ms: 2000,
            calibration_refresh_ms: 200,

            // Knob
            knob_full_scale_mv: 4999,
            duration_scale_percent: 250,

            // ADC
            adc_full_scale_mv: 5000,
            adc_max_counts: 4095,

            // Button
            button_debounce_ms: 50,
        }
    }
}

impl SystemConfig {
    /// Reject values the control loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.day_length_ms == 0 {
            return Err(Error::Config("day_length_ms must be non-zero"));
        }
        if self.loop_interval_ms == 0 {
            return Err(Error::Config("loop_interval_ms must be non-zero"));
        }
        if self.watering_tick_ms == 0 {
            return Err(Error::Config("watering_tick_ms must be non-zero"));
        }
        if self.knob_full_scale_mv == 0 {
            return Err(Error::Config("knob_full_scale_mv must be non-zero"));
        }
        if self.adc_full_scale_mv == 0 || self.adc_max_counts == 0 {
            return Err(Error::Config("ADC full scale must be non-zero"));
        }
        if self
            .zones
            .iter()
            .any(|z| !z.calibration.slope.is_finite() || !z.calibration.intercept.is_finite())
        {
            return Err(Error::Config("calibration coefficients must be finite"));
        }
        Ok(())
    }
}
