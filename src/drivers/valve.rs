//! Solenoid valve bank.
//!
//! One digital output per zone, HIGH = open.  The bank remembers the last
//! state it successfully commanded so callers can query it without
//! reading the pins back.

use embedded_hal::digital::OutputPin;
use log::debug;

use crate::app::ports::ValveState;
use crate::error::ActuatorError;
use crate::zones::{ZONE_COUNT, ZoneId};

pub struct ValveBank<P: OutputPin> {
    pins: [P; ZONE_COUNT],
    state: [ValveState; ZONE_COUNT],
}

impl<P: OutputPin> ValveBank<P> {
    /// Take ownership of the four valve outputs, in zone order.  Pins are
    /// assumed low (closed) at reset; call `close_all` on the port to be sure.
    pub fn new(pins: [P; ZONE_COUNT]) -> Self {
        Self {
            pins,
            state: [ValveState::Closed; ZONE_COUNT],
        }
    }

    pub fn set(&mut self, zone: ZoneId, state: ValveState) -> Result<(), ActuatorError> {
        let pin = &mut self.pins[zone.index()];
        let result = match state {
            ValveState::Open => pin.set_high(),
            ValveState::Closed => pin.set_low(),
        };
        result.map_err(|_| ActuatorError::ValveWriteFailed(zone))?;
        self.state[zone.index()] = state;
        debug!("Valve {}: {:?}", zone.number(), state);
        Ok(())
    }

    pub fn state(&self, zone: ZoneId) -> ValveState {
        self.state[zone.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    #[derive(Default)]
    struct Pin {
        high: bool,
        broken: bool,
    }

    #[derive(Debug)]
    struct PinFault;

    impl embedded_hal::digital::Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for Pin {
        type Error = PinFault;
    }

    impl OutputPin for Pin {
        fn set_low(&mut self) -> Result<(), PinFault> {
            if self.broken {
                return Err(PinFault);
            }
            self.high = false;
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), PinFault> {
            if self.broken {
                return Err(PinFault);
            }
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn open_drives_pin_high() {
        let mut bank = ValveBank::<Pin>::new(Default::default());
        bank.set(ZoneId::ALL[2], ValveState::Open).unwrap();
        assert!(bank.pins[2].high);
        assert_eq!(bank.state(ZoneId::ALL[2]), ValveState::Open);
        bank.set(ZoneId::ALL[2], ValveState::Closed).unwrap();
        assert!(!bank.pins[2].high);
        assert_eq!(bank.state(ZoneId::ALL[2]), ValveState::Closed);
    }

    #[test]
    fn pin_error_names_the_zone() {
        let mut bank = ValveBank::<Pin>::new(Default::default());
        bank.pins[1].broken = true;
        assert_eq!(
            bank.set(ZoneId::ALL[1], ValveState::Open),
            Err(ActuatorError::ValveWriteFailed(ZoneId::ALL[1]))
        );
        assert_eq!(bank.state(ZoneId::ALL[1]), ValveState::Closed);
    }
}
