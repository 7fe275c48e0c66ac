//! GPIO / peripheral pin assignments for the WaterLin controller board.
//!
//! Single source of truth: every driver and `main()` reference this module
//! rather than hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Analog front end (one ADC input behind an 8:1 multiplexer)
// ---------------------------------------------------------------------------

/// Shared sense line from the mux common pin.
/// ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const SENSE_ADC_GPIO: i32 = 5;
pub const SENSE_ADC1_CHANNEL: u32 = 4;

/// Mux address lines S0..S2 (LSB first).
pub const MUX_SELECT_GPIOS: [i32; 3] = [1, 2, 3];

/// Mux inputs wired to the four soil probes, in zone order.
pub const SOIL_MUX_CHANNELS: [u8; 4] = [0, 1, 2, 3];
/// Mux input wired to the configuration knob wiper.
pub const KNOB_MUX_CHANNEL: u8 = 4;

// ---------------------------------------------------------------------------
// Solenoid valves (driven through logic-level MOSFETs, HIGH = open)
// ---------------------------------------------------------------------------

pub const VALVE_GPIOS: [i32; 4] = [11, 12, 13, 14];

// ---------------------------------------------------------------------------
// Operator inputs
// ---------------------------------------------------------------------------

/// Menu push-button, active LOW with internal pull-up.
pub const BUTTON_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// 16x2 HD44780 character LCD (4-bit bus, write only)
// ---------------------------------------------------------------------------

pub const LCD_RS_GPIO: i32 = 16;
pub const LCD_EN_GPIO: i32 = 17;
/// D4..D7.
pub const LCD_DATA_GPIOS: [i32; 4] = [18, 8, 9, 10];
