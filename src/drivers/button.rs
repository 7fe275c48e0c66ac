//! Polled, debounced push-button driver.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up.  The control loop polls the
//! pin once per iteration; a press is reported once, on the poll where the
//! pin has been continuously low for the debounce window.  Holding the
//! button does not repeat.
//!
//! ```text
//!  Released ──[low]──▶ Settling ──[low ≥ debounce]──▶ Held ──[high]──▶ Released
//!                        │                         (emit Pressed)
//!                        └──[high]──▶ Released
//! ```

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::ButtonEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Released,
    Settling { since_ms: u64 },
    Held,
}

pub struct ButtonDriver<B: InputPin> {
    pin: B,
    debounce_ms: u64,
    state: DebounceState,
}

impl<B: InputPin> ButtonDriver<B> {
    pub fn new(pin: B, debounce_ms: u32) -> Self {
        Self {
            pin,
            debounce_ms: u64::from(debounce_ms),
            state: DebounceState::Released,
        }
    }

    /// Call once per loop iteration.  `now_ms` is monotonic uptime.
    pub fn poll(&mut self, now_ms: u64) -> ButtonEvent {
        let low = match self.pin.is_low() {
            Ok(low) => low,
            Err(_) => {
                warn!("Button: pin read failed, treating as released");
                false
            }
        };

        match (self.state, low) {
            (DebounceState::Released, true) => {
                self.state = DebounceState::Settling { since_ms: now_ms };
                if self.debounce_ms == 0 {
                    self.state = DebounceState::Held;
                    return ButtonEvent::Pressed;
                }
                ButtonEvent::Idle
            }
            (DebounceState::Settling { since_ms }, true) => {
                if now_ms.saturating_sub(since_ms) >= self.debounce_ms {
                    self.state = DebounceState::Held;
                    ButtonEvent::Pressed
                } else {
                    ButtonEvent::Idle
                }
            }
            (DebounceState::Held, true) => ButtonEvent::Idle,
            (_, false) => {
                self.state = DebounceState::Released;
                ButtonEvent::Idle
            }
        }
    }
}
