//! WaterLin firmware entry point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                    │
//! │                                                            │
//! │  HardwareAdapter                       LogEventSink        │
//! │  (Sensor + Valve + Button + Display)   (EventSink)         │
//! │                                                            │
//! │  ──────────────── Port Trait Boundary ───────────────      │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │              Controller (pure logic)                 │  │
//! │  │  Menu FSM · Dryness · Irrigation · Day window        │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyOutputPin, Output, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use waterlin::adapters::hardware::HardwareAdapter;
use waterlin::adapters::log_sink::LogEventSink;
use waterlin::app::service::Controller;
use waterlin::config::SystemConfig;
use waterlin::drivers::button::ButtonDriver;
use waterlin::drivers::hw_init;
use waterlin::drivers::lcd::Lcd;
use waterlin::drivers::mux::AnalogMux;
use waterlin::drivers::valve::ValveBank;
use waterlin::pins;
use waterlin::sensors::ProbeArray;

type Out = PinDriver<'static, AnyOutputPin, Output>;

fn output(pin: impl OutputPin + 'static) -> Result<Out> {
    let mut driver = PinDriver::output(pin.downgrade_output())?;
    driver.set_low()?;
    Ok(driver)
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  WaterLin v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Peripherals (GPIO numbers mirror `pins`) ───────────
    let p = Peripherals::take()?;
    hw_init::init_adc(pins::SENSE_ADC1_CHANNEL)?;

    let mux = AnalogMux::new([output(p.pins.gpio1)?, output(p.pins.gpio2)?, output(p.pins.gpio3)?]);
    let probes = ProbeArray::new(mux, pins::SENSE_ADC1_CHANNEL, &config);

    let valves = ValveBank::new([
        output(p.pins.gpio11)?,
        output(p.pins.gpio12)?,
        output(p.pins.gpio13)?,
        output(p.pins.gpio14)?,
    ]);

    let mut button_pin = PinDriver::input(p.pins.gpio15)?;
    button_pin.set_pull(Pull::Up)?;
    let button = ButtonDriver::new(button_pin, config.button_debounce_ms);

    let mut lcd = Lcd::new(
        output(p.pins.gpio16)?,
        output(p.pins.gpio17)?,
        [
            output(p.pins.gpio18)?,
            output(p.pins.gpio8)?,
            output(p.pins.gpio9)?,
            output(p.pins.gpio10)?,
        ],
        Ets,
    );
    if let Err(e) = lcd.init() {
        // Presentation only; keep irrigating without a panel.
        log::warn!("LCD init failed: {}", e);
    }

    let mut hw = HardwareAdapter::new(probes, valves, button, lcd, Ets);
    info!("Hardware ready");

    // ── 3. Control loop (never returns) ───────────────────────
    let controller = Controller::new(config)?;
    let mut sink = LogEventSink::new();
    let mut delay = FreeRtos;
    controller.run_forever(&mut hw, &mut delay, &mut sink)
}
