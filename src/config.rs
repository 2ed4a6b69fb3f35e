//! Wiring and timing of the sonar logger.
//!
//! Everything the firmware needs to know about the board lives in
//! [`SonarConfig`]. `SonarConfig::default()` is the stock wiring: sensor on
//! GPIO2/GPIO3, console on UART0 and the clock kept in software.

use chrono::{NaiveDate, NaiveDateTime};

use crate::sensors::{DEFAULT_ECHO_TIMEOUT_US, DEFAULT_TRIGGER_PULSE_US};

pub const DEFAULT_TRIGGER_PIN: usize = 2;
pub const DEFAULT_ECHO_PIN: usize = 3;
pub const DEFAULT_COMMAND_TIMEOUT_MS: u32 = 100;
pub const DEFAULT_READING_INTERVAL_MS: u32 = 1_000;

pub const DEFAULT_UART_NUM: usize = 0;
pub const DEFAULT_UART_TX_PIN: usize = 16;
pub const DEFAULT_UART_RX_PIN: usize = 17;
pub const DEFAULT_BAUDRATE: u32 = 115_200;

pub const DEFAULT_I2C_SDA_PIN: usize = 5;
pub const DEFAULT_I2C_SCL_PIN: usize = 6;

/// Date the wall clock is set to at boot: 2024-03-19 22:10:00
pub fn default_rtc_seed() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 19)
        .and_then(|date| date.and_hms_opt(22, 10, 0))
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub uart_num: usize,
    pub tx_pin: usize,
    pub rx_pin: usize,
    pub baudrate: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            uart_num: DEFAULT_UART_NUM,
            tx_pin: DEFAULT_UART_TX_PIN,
            rx_pin: DEFAULT_UART_RX_PIN,
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

/// Where the timestamps come from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RtcSource {
    /// Seed plus monotonic time, see [`crate::rtc::SoftRtc`]
    #[default]
    Internal,
    /// External DS3231 on the given I2C pins
    Ds3231 { sda_pin: usize, scl_pin: usize },
}

impl RtcSource {
    pub fn ds3231_on_default_pins() -> RtcSource {
        RtcSource::Ds3231 { sda_pin: DEFAULT_I2C_SDA_PIN, scl_pin: DEFAULT_I2C_SCL_PIN }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtcConfig {
    pub source: RtcSource,
    pub seed: NaiveDateTime,
    /// Battery backed clocks may want to keep their time across resets
    pub seed_on_boot: bool,
}

impl Default for RtcConfig {
    fn default() -> Self {
        RtcConfig {
            source: RtcSource::default(),
            seed: default_rtc_seed(),
            seed_on_boot: true,
        }
    }
}

/// Timings of the command loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    pub command_timeout_ms: u32,
    pub reading_interval_ms: u32,
}

impl Default for LoopTiming {
    fn default() -> Self {
        LoopTiming {
            command_timeout_ms: DEFAULT_COMMAND_TIMEOUT_MS,
            reading_interval_ms: DEFAULT_READING_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SonarConfig {
    pub trigger_pin: usize,
    pub echo_pin: usize,
    pub echo_timeout_us: u64,
    pub trigger_pulse_us: u32,
    pub timing: LoopTiming,
    pub console: ConsoleConfig,
    pub rtc: RtcConfig,
}

impl Default for SonarConfig {
    fn default() -> Self {
        SonarConfig {
            trigger_pin: DEFAULT_TRIGGER_PIN,
            echo_pin: DEFAULT_ECHO_PIN,
            echo_timeout_us: DEFAULT_ECHO_TIMEOUT_US,
            trigger_pulse_us: DEFAULT_TRIGGER_PULSE_US,
            timing: LoopTiming::default(),
            console: ConsoleConfig::default(),
            rtc: RtcConfig::default(),
        }
    }
}
