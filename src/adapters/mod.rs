//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                     |
//! |------------|--------------|---------------------------------|
//! | `hardware` | SensorPort   | ADC1 behind the analog mux      |
//! |            | ValvePort    | Valve GPIOs                     |
//! |            | ButtonPort   | Menu button GPIO                |
//! |            | DisplayPort  | HD44780 LCD                     |
//! | `log_sink` | EventSink    | Serial log output               |
//! | `time`     | -            | Monotonic uptime for debouncing |

pub mod hardware;
pub mod log_sink;
pub mod time;
