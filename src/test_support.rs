//! Simulated hardware shared by the unit tests.

use std::{cell::Cell, collections::VecDeque, rc::Rc};

use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorKind, ErrorType, InputPin, OutputPin},
};

use crate::{
    console::Console,
    sensors::{EchoPhase, HCSR04Error, Measurement, RangeSensor},
    utils::clock::MicrosClock,
};

/// Microsecond clock that only moves when a test (or a simulated pin) moves it
#[derive(Clone)]
pub struct SimClock {
    now: Rc<Cell<u64>>,
}

impl SimClock {
    pub fn new(start_us: u64) -> SimClock {
        SimClock { now: Rc::new(Cell::new(start_us)) }
    }

    pub fn advance(&self, us: u64) {
        self.now.set(self.now.get() + us);
    }
}

impl MicrosClock for SimClock {
    fn now_us(&self) -> u64 {
        self.now.get()
    }
}

const IDLE_POLL_US: u64 = 100;

/// Echo line driven by a script of `(advance_us, level)` reads. Each read first
/// moves the clock by `advance_us` and then reports `level`. Once the script is
/// exhausted the line stays at `idle_level` and every read costs 100us.
/// Read number `fail_at` (counting from zero) returns an error instead.
pub struct ScriptedEcho {
    clock: SimClock,
    script: VecDeque<(u64, bool)>,
    idle_level: bool,
    fail_at: Option<usize>,
    pub reads: usize,
}

impl ScriptedEcho {
    pub fn idle(clock: &SimClock, level: bool) -> ScriptedEcho {
        ScriptedEcho {
            clock: clock.clone(),
            script: VecDeque::new(),
            idle_level: level,
            fail_at: None,
            reads: 0,
        }
    }

    /// Rising edge `rise_after_us` after the first read, falling edge `width_us` later
    pub fn pulse(clock: &SimClock, rise_after_us: u64, width_us: u64) -> ScriptedEcho {
        let mut echo = ScriptedEcho::idle(clock, false);
        if rise_after_us > 0 {
            echo.script.push_back((0, false));
        }
        echo.script.push_back((rise_after_us, true));
        echo.script.push_back((width_us, false));
        echo
    }

    pub fn failing_at(mut self, read: usize) -> ScriptedEcho {
        self.fail_at = Some(read);
        self
    }
}

impl ErrorType for ScriptedEcho {
    type Error = ErrorKind;
}

impl InputPin for ScriptedEcho {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let read = self.reads;
        self.reads += 1;
        if self.fail_at == Some(read) {
            return Err(ErrorKind::Other);
        }
        let (advance_us, level) = self.script.pop_front().unwrap_or((IDLE_POLL_US, self.idle_level));
        self.clock.advance(advance_us);
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// Trigger line that remembers every level it was driven to
#[derive(Default)]
pub struct RecordingTrigger {
    pub levels: Vec<bool>,
    pub is_set_high: bool,
    pub fail_high: bool,
}

impl ErrorType for RecordingTrigger {
    type Error = ErrorKind;
}

impl OutputPin for RecordingTrigger {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail_high {
            return Err(ErrorKind::Other);
        }
        self.levels.push(true);
        self.is_set_high = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        self.is_set_high = false;
        Ok(())
    }
}

/// Delay that returns immediately and adds up what it was asked to wait
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleFault;

/// Console fed from a queue of polls. `Ok(None)` is a poll that timed out and
/// an empty queue behaves the same. Writes fail while `fail_writes` is set.
#[derive(Default)]
pub struct MockConsole {
    pub input: VecDeque<Result<Option<u8>, ConsoleFault>>,
    pub output: Vec<String>,
    pub last_timeout_ms: Option<u32>,
    pub fail_writes: bool,
    pub failed_writes: usize,
}

impl MockConsole {
    pub fn with_input(bytes: &[u8]) -> MockConsole {
        MockConsole {
            input: bytes.iter().map(|byte| Ok(Some(*byte))).collect(),
            ..MockConsole::default()
        }
    }
}

impl Console for MockConsole {
    type Error = ConsoleFault;

    fn read_byte(&mut self, timeout_ms: u32) -> Result<Option<u8>, Self::Error> {
        self.last_timeout_ms = Some(timeout_ms);
        self.input.pop_front().unwrap_or(Ok(None))
    }

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        if self.fail_writes {
            self.failed_writes += 1;
            return Err(ConsoleFault);
        }
        self.output.push(line.to_string());
        Ok(())
    }
}

/// Sensor that replays canned measurements
#[derive(Default)]
pub struct CannedSensor {
    pub readings: VecDeque<Measurement>,
    pub calls: usize,
}

impl RangeSensor for CannedSensor {
    fn measure(&mut self) -> Measurement {
        self.calls += 1;
        self.readings
            .pop_front()
            .unwrap_or(Err(HCSR04Error::EchoTimeout(EchoPhase::Rising)))
    }
}
