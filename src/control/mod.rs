//! Control algorithms: probe calibration, dryness decision, watering cycle.

pub mod calibration;
pub mod dryness;
pub mod irrigation;
