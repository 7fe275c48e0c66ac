//! Peripheral drivers: valves, multiplexer, button, LCD, ADC bring-up.

pub mod button;
pub mod hw_init;
pub mod lcd;
pub mod mux;
pub mod valve;
