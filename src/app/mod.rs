//! Application core: pure domain logic, zero I/O.
//!
//! The [`service::Controller`] drives the menu, the dryness pass and the
//! watering cycle.  All interaction with hardware happens through the
//! **port traits** in [`ports`], keeping this layer testable without real
//! peripherals.

pub mod display;
pub mod events;
pub mod ports;
pub mod service;
