//! Sensor subsystem: the four soil probes and the knob behind one mux.
//!
//! [`ProbeArray`] owns the multiplexer and turns "read zone N" or "read
//! the knob" into select, settle, convert, scale.

pub mod knob;
pub mod soil;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::trace;

use crate::config::SystemConfig;
use crate::drivers::hw_init;
use crate::drivers::mux::AnalogMux;
use crate::error::SensorError;
use crate::pins;
use crate::zones::ZoneId;

/// Front-end scaling copied out of [`SystemConfig`].
#[derive(Debug, Clone, Copy)]
struct Scaling {
    adc_full_scale_mv: u16,
    adc_max_counts: u16,
    knob_full_scale_mv: u16,
}

pub struct ProbeArray<P: OutputPin> {
    mux: AnalogMux<P>,
    adc_channel: u32,
    scaling: Scaling,
}

impl<P: OutputPin> ProbeArray<P> {
    pub fn new(mux: AnalogMux<P>, adc_channel: u32, config: &SystemConfig) -> Self {
        Self {
            mux,
            adc_channel,
            scaling: Scaling {
                adc_full_scale_mv: config.adc_full_scale_mv,
                adc_max_counts: config.adc_max_counts,
                knob_full_scale_mv: config.knob_full_scale_mv,
            },
        }
    }

    /// Millivolts on one mux input.
    pub fn read_channel_mv(&mut self, channel: u8, delay: &mut impl DelayNs) -> Result<i32, SensorError> {
        self.mux.select(channel, delay)?;
        let counts = hw_init::adc1_read(self.adc_channel).ok_or(SensorError::AdcReadFailed)?;
        let mv = soil::counts_to_millivolts(
            counts,
            self.scaling.adc_full_scale_mv,
            self.scaling.adc_max_counts,
        );
        trace!("mux {} -> {} counts, {} mV", channel, counts, mv);
        Ok(mv)
    }

    pub fn read_zone_mv(&mut self, zone: ZoneId, delay: &mut impl DelayNs) -> Result<i32, SensorError> {
        self.read_channel_mv(pins::SOIL_MUX_CHANNELS[zone.index()], delay)
    }

    pub fn read_knob_ratio(&mut self, delay: &mut impl DelayNs) -> Result<f32, SensorError> {
        let mv = self.read_channel_mv(pins::KNOB_MUX_CHANNEL, delay)?;
        Ok(knob::ratio(mv, self.scaling.knob_full_scale_mv))
    }
}
