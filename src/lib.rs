//! Ultrasonic distance logger.
//!
//! Drives an HC-SR04 from a pair of GPIOs, timestamps every reading with a wall
//! clock and takes `s`/`p` start and stop commands over a serial console.
//! Sensor, clock and console logic is written against `embedded-hal` and the
//! small traits in this crate, so it builds and is tested on the host. The
//! ESP-IDF drivers behind them only build for the `espidf` target.

mod utils;
#[cfg(any(target_os = "espidf", test))]
mod microcontroller_src;
#[cfg(test)]
mod test_support;

pub mod config;
pub mod console;
pub mod rtc;
pub mod sensors;
pub mod sonar;

#[cfg(target_os = "espidf")]
pub mod firmware;
#[cfg(target_os = "espidf")]
pub mod gpio;
#[cfg(target_os = "espidf")]
pub mod serial;

#[cfg(target_os = "espidf")]
pub use microcontroller_src::Microcontroller;
#[cfg(target_os = "espidf")]
pub use utils::sonar_error;
pub use utils::clock;
