//! HD44780 16x2 character LCD on a write-only 4-bit bus.
//!
//! RS selects command (low) or data (high); each byte goes out as two
//! nibbles, high first, latched on the falling edge of EN.  The R/W line
//! is tied low, so the busy flag is never read and fixed delays are used
//! instead.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::info;

use crate::app::display::{DisplayFrame, LCD_COLS, LCD_ROWS};
use crate::error::ActuatorError;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CTRL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

/// Increment cursor, no display shift.
const ENTRY_LEFT_TO_RIGHT: u8 = 0x02;
/// Display on, cursor and blink off.
const DISPLAY_ON: u8 = 0x04;
/// Two lines, 5x8 font (4-bit bus is the zero bit).
const FUNCTION_TWO_LINES: u8 = 0x08;

const ROW_OFFSETS: [u8; LCD_ROWS] = [0x00, 0x40];

type LcdResult = Result<(), ActuatorError>;

pub struct Lcd<P: OutputPin, D: DelayNs> {
    rs: P,
    en: P,
    /// D4..D7.
    data: [P; 4],
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Lcd<P, D> {
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Self {
        Self { rs, en, data, delay }
    }

    /// Power-on initialisation into 4-bit, two-line mode.
    pub fn init(&mut self) -> LcdResult {
        self.delay.delay_ms(50);
        self.pin(|lcd| lcd.rs.set_low())?;

        // Three 8-bit function sets, then switch to 4-bit.
        for wait_us in [4500, 150, 150] {
            self.send4(0x3)?;
            self.delay.delay_us(wait_us);
        }
        self.send4(0x2)?;
        self.delay.delay_us(150);

        self.command(CMD_FUNCTION_SET | FUNCTION_TWO_LINES)?;
        self.command(CMD_DISPLAY_CTRL | DISPLAY_ON)?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT_TO_RIGHT)?;
        self.clear()?;
        info!("LCD initialised ({}x{})", LCD_COLS, LCD_ROWS);
        Ok(())
    }

    pub fn clear(&mut self) -> LcdResult {
        self.command(CMD_CLEAR)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    pub fn set_position(&mut self, col: u8, row: u8) -> LcdResult {
        let offset = ROW_OFFSETS[usize::from(row) % LCD_ROWS];
        self.command(CMD_SET_DDRAM | (offset + col))
    }

    pub fn print(&mut self, text: &str) -> LcdResult {
        for byte in text.bytes() {
            self.send8(byte, true)?;
            self.delay.delay_us(50);
        }
        Ok(())
    }

    /// Overwrite both rows.  Each line is space-padded to the full width
    /// so no clear (and no flicker) is needed between frames.
    pub fn draw(&mut self, frame: &DisplayFrame) -> LcdResult {
        for (row, line) in frame.lines.iter().enumerate() {
            self.set_position(0, row as u8)?;
            self.print(line)?;
            for _ in line.len()..LCD_COLS {
                self.send8(b' ', true)?;
                self.delay.delay_us(50);
            }
        }
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> LcdResult {
        self.send8(cmd, false)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn send8(&mut self, byte: u8, data: bool) -> LcdResult {
        self.pin(|lcd| if data { lcd.rs.set_high() } else { lcd.rs.set_low() })?;
        self.send4(byte >> 4)?;
        self.send4(byte & 0x0f)
    }

    fn send4(&mut self, nibble: u8) -> LcdResult {
        for bit in 0..4 {
            self.pin(|lcd| {
                let pin = &mut lcd.data[bit];
                if nibble & (1 << bit) != 0 {
                    pin.set_high()
                } else {
                    pin.set_low()
                }
            })?;
        }
        self.pulse()
    }

    fn pulse(&mut self) -> LcdResult {
        self.pin(|lcd| lcd.en.set_high())?;
        self.delay.delay_us(1);
        self.pin(|lcd| lcd.en.set_low())?;
        self.delay.delay_us(1);
        Ok(())
    }

    fn pin(&mut self, f: impl FnOnce(&mut Self) -> Result<(), P::Error>) -> LcdResult {
        f(self).map_err(|_| ActuatorError::DisplayWriteFailed)
    }
}
