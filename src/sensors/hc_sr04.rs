use embedded_hal::{
    delay::DelayNs,
    digital::{Error, ErrorKind, InputPin, OutputPin},
};

use crate::utils::clock::MicrosClock;
use super::RangeSensor;

/// Maximum wait for each echo edge, in microseconds.
pub const DEFAULT_ECHO_TIMEOUT_US: u64 = 30_000;
/// How long the trigger line is held high to fire a burst.
pub const DEFAULT_TRIGGER_PULSE_US: u32 = 10;
/// Round-trip echo time per centimeter at standard conditions.
pub const ECHO_US_PER_CM: u64 = 58;

/// Distance to the object in front of the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distance {
    echo_us: u64,
}

impl Distance {
    /// Builds a distance from the width of an echo pulse in microseconds
    pub fn from_echo_us(echo_us: u64) -> Distance {
        Distance { echo_us }
    }

    /// Whole centimeters. The conversion truncates, 579us is still 9cm.
    pub fn cm(&self) -> u32 {
        u32::try_from(self.echo_us / ECHO_US_PER_CM).unwrap_or(u32::MAX)
    }

    /// Width of the echo pulse this distance was computed from
    pub fn echo_us(&self) -> u64 {
        self.echo_us
    }
}

/// Edge the sampler was waiting for when it gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoPhase {
    Rising,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HCSR04Error {
    EchoTimeout(EchoPhase),
    TriggerPin(ErrorKind),
    EchoPin(ErrorKind),
}

/// Result of a single trigger/echo cycle
pub type Measurement = Result<Distance, HCSR04Error>;

/// Blocking driver for the HC-SR04 ultrasonic sensor.
///
/// Every measurement fires a trigger pulse and then busy-polls the echo line
/// twice, once for the rising edge and once for the falling edge, each wait
/// bounded by `timeout_us` against `clock`. No interrupts are used.
pub struct HCSR04<T, E, C, D> {
    trig: T,
    echo: E,
    clock: C,
    delay: D,
    timeout_us: u64,
    trigger_pulse_us: u32,
}

impl<T, E, C, D> HCSR04<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: MicrosClock,
    D: DelayNs,
{
    pub fn new(trig: T, echo: E, clock: C, delay: D) -> HCSR04<T, E, C, D> {
        HCSR04 {
            trig,
            echo,
            clock,
            delay,
            timeout_us: DEFAULT_ECHO_TIMEOUT_US,
            trigger_pulse_us: DEFAULT_TRIGGER_PULSE_US,
        }
    }

    /// Replaces the per-phase echo timeout
    pub fn with_timeout_us(mut self, timeout_us: u64) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Replaces the trigger pulse width
    pub fn with_trigger_pulse_us(mut self, trigger_pulse_us: u32) -> Self {
        self.trigger_pulse_us = trigger_pulse_us;
        self
    }

    pub fn timeout_us(&self) -> u64 {
        self.timeout_us
    }

    /// Sets the trigger pin high for `trigger_pulse_us` so the sonic burst is sent.
    ///
    /// The line is always driven low before returning, even if driving it high
    /// failed.
    pub fn trigger(&mut self) -> Result<(), HCSR04Error> {
        let high = self.trig.set_high();
        self.delay.delay_us(self.trigger_pulse_us);
        let low = self.trig.set_low();
        high.and(low).map_err(|err| HCSR04Error::TriggerPin(err.kind()))
    }

    /// Fires the sensor and measures the echo.
    ///
    /// # Returns
    ///
    /// The [`Distance`] in front of the sensor, or `EchoTimeout` naming the edge
    /// that was not seen within the timeout.
    pub fn measure(&mut self) -> Measurement {
        self.trigger()?;

        let rising_at = self.wait_for_echo(true, EchoPhase::Rising)?;
        let falling_at = self.wait_for_echo(false, EchoPhase::Falling)?;

        let echo_us = falling_at.saturating_sub(rising_at);
        log::debug!("echo pulse of {}us", echo_us);
        Ok(Distance::from_echo_us(echo_us))
    }

    /// Polls the echo line until it reads `high`, returning the time it did so.
    /// The level is checked before the deadline on every poll.
    fn wait_for_echo(&mut self, high: bool, phase: EchoPhase) -> Result<u64, HCSR04Error> {
        let wait_start = self.clock.now_us();
        loop {
            let is_high = self.echo.is_high().map_err(|err| HCSR04Error::EchoPin(err.kind()))?;
            if is_high == high {
                return Ok(self.clock.now_us());
            }
            if self.clock.now_us().saturating_sub(wait_start) > self.timeout_us {
                return Err(HCSR04Error::EchoTimeout(phase));
            }
        }
    }
}

impl<T, E, C, D> RangeSensor for HCSR04<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: MicrosClock,
    D: DelayNs,
{
    fn measure(&mut self) -> Measurement {
        HCSR04::measure(self)
    }
}
