//! 8:1 analog multiplexer (CD4051-style) in front of the single ADC input.
//!
//! Three address lines select which input reaches the sense pin.  After
//! switching, the output needs a short settle time before a conversion.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::trace;

use crate::error::SensorError;

/// Select-line settle time before sampling.
const SETTLE_US: u32 = 10;

pub struct AnalogMux<P: OutputPin> {
    select: [P; 3],
    current: Option<u8>,
}

impl<P: OutputPin> AnalogMux<P> {
    /// `select` is S0..S2, least significant bit first.
    pub fn new(select: [P; 3]) -> Self {
        Self {
            select,
            current: None,
        }
    }

    /// Route `channel` (0..=7) to the sense line.
    pub fn select(&mut self, channel: u8, delay: &mut impl DelayNs) -> Result<(), SensorError> {
        if channel > 7 {
            return Err(SensorError::MuxSelectFailed);
        }
        if self.current == Some(channel) {
            return Ok(());
        }
        for (bit, pin) in self.select.iter_mut().enumerate() {
            let high = channel & (1 << bit) != 0;
            let res = if high { pin.set_high() } else { pin.set_low() };
            if res.is_err() {
                self.current = None;
                return Err(SensorError::MuxSelectFailed);
            }
        }
        self.current = Some(channel);

        #[cfg(not(target_os = "espidf"))]
        crate::drivers::hw_init::sim_route(channel);

        delay.delay_us(SETTLE_US);
        trace!("mux -> {}", channel);
        Ok(())
    }
}
