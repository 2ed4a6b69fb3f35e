use embedded_hal::delay::DelayNs;

use crate::{
    config::LoopTiming,
    console::{reading_line, transition_line, ActivationFlag, Command, Console, PROMPT_LINE},
    rtc::WallClock,
    sensors::RangeSensor,
};

/// The firmware main loop: polls the console for commands and, while active,
/// prints one timestamped reading per interval.
///
/// Nothing in here is fatal. Failed readings are printed as `Failure`, any
/// other error is logged and the loop carries on.
pub struct SonarLoop<S, W, C, D> {
    sensor: S,
    rtc: W,
    console: C,
    delay: D,
    timing: LoopTiming,
    activation: ActivationFlag,
}

impl<S, W, C, D> SonarLoop<S, W, C, D>
where
    S: RangeSensor,
    W: WallClock,
    C: Console,
    D: DelayNs,
{
    pub fn new(sensor: S, rtc: W, console: C, delay: D, timing: LoopTiming) -> SonarLoop<S, W, C, D> {
        SonarLoop {
            sensor,
            rtc,
            console,
            delay,
            timing,
            activation: ActivationFlag::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_active()
    }

    /// Seeds the wall clock when asked to and shows the prompt
    pub fn boot(&mut self, seed: Option<chrono::NaiveDateTime>) {
        if let Some(seed) = seed {
            match self.rtc.set_datetime(seed) {
                Ok(()) => log::info!("Wall clock set to {}", seed),
                Err(err) => log::error!("Could not set the wall clock: {:?}", err),
            }
        }
        self.print(PROMPT_LINE);
    }

    /// One pass of the loop. Blocks for at most the command timeout, plus one
    /// reading and the reading interval when active.
    pub fn step(&mut self) {
        let byte = match self.console.read_byte(self.timing.command_timeout_ms) {
            Ok(byte) => byte,
            Err(err) => {
                log::warn!("Console read failed: {:?}", err);
                None
            }
        };

        if let Some(command) = byte.and_then(Command::from_byte) {
            if let Some(transition) = self.activation.apply(command) {
                log::info!("{:?}", transition);
                self.print(transition_line(transition));
            }
        }

        if self.activation.is_active() {
            self.take_reading();
            self.delay.delay_ms(self.timing.reading_interval_ms);
        }
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    fn take_reading(&mut self) {
        let time = match self.rtc.datetime() {
            Ok(date_time) => Some(date_time.time()),
            Err(err) => {
                log::warn!("Could not read the wall clock: {:?}", err);
                None
            }
        };

        let measurement = self.sensor.measure();
        if let Err(err) = &measurement {
            log::warn!("Measurement failed: {:?}", err);
        }
        self.print(&reading_line(time, &measurement));
    }

    fn print(&mut self, line: &str) {
        if let Err(err) = self.console.write_line(line) {
            log::error!("Console write failed: {:?}", err);
        }
    }

    /// Tears the loop apart, giving back its parts
    pub fn release(self) -> (S, W, C, D) {
        (self.sensor, self.rtc, self.console, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::default_rtc_seed,
        rtc::SoftRtc,
        sensors::{Distance, EchoPhase, HCSR04Error, HCSR04},
        test_support::{
            CannedSensor, ConsoleFault, MockConsole, RecordingDelay, RecordingTrigger, ScriptedEcho, SimClock,
        },
    };

    type TestLoop<S> = SonarLoop<S, SoftRtc<SimClock>, MockConsole, RecordingDelay>;

    fn canned_loop(input: &[u8], readings: Vec<crate::sensors::Measurement>) -> TestLoop<CannedSensor> {
        let clock = SimClock::new(0);
        let sensor = CannedSensor { readings: readings.into(), calls: 0 };
        SonarLoop::new(
            sensor,
            SoftRtc::new(clock, default_rtc_seed()),
            MockConsole::with_input(input),
            RecordingDelay::default(),
            LoopTiming::default(),
        )
    }

    fn steps<S: RangeSensor>(sonar: &mut TestLoop<S>, count: usize) {
        for _ in 0..count {
            sonar.step();
        }
    }

    #[test]
    fn boot_prints_the_prompt() {
        let mut sonar = canned_loop(&[], vec![]);
        sonar.boot(Some(default_rtc_seed()));

        let (_, _, console, _) = sonar.release();
        assert_eq!(console.output, vec!["Type 's' to start readings."]);
    }

    #[test]
    fn boot_seeds_the_wall_clock() {
        let clock = SimClock::new(0);
        let mut rtc = SoftRtc::new(clock.clone(), default_rtc_seed());
        rtc.set_datetime(chrono::NaiveDateTime::MIN).unwrap();
        let mut sonar = SonarLoop::new(
            CannedSensor::default(),
            rtc,
            MockConsole::default(),
            RecordingDelay::default(),
            LoopTiming::default(),
        );

        sonar.boot(Some(default_rtc_seed()));
        let (_, mut rtc, _, _) = sonar.release();
        assert_eq!(rtc.datetime().unwrap(), default_rtc_seed());
    }

    #[test]
    fn idle_loop_prints_nothing_and_never_measures() {
        let mut sonar = canned_loop(&[b'x', b'\n'], vec![]);
        steps(&mut sonar, 5);

        assert!(!sonar.is_active());
        let (sensor, _, console, delay) = sonar.release();
        assert!(console.output.is_empty());
        assert_eq!(console.last_timeout_ms, Some(100));
        assert_eq!(sensor.calls, 0);
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn start_prints_status_then_a_reading_per_step() {
        let readings = vec![Ok(Distance::from_echo_us(580)), Ok(Distance::from_echo_us(1160))];
        let mut sonar = canned_loop(&[b's'], readings);
        steps(&mut sonar, 2);

        let (sensor, _, console, delay) = sonar.release();
        assert_eq!(
            console.output,
            vec!["Starting readings...", "22:10:00 - 10 cm", "22:10:00 - 20 cm"]
        );
        assert_eq!(sensor.calls, 2);
        assert_eq!(delay.total_ns, 2 * 1_000_000_000);
    }

    #[test]
    fn repeated_start_is_silent() {
        let readings = vec![Ok(Distance::from_echo_us(0)), Ok(Distance::from_echo_us(0))];
        let mut sonar = canned_loop(&[b's', b's'], readings);
        steps(&mut sonar, 2);

        assert!(sonar.is_active());
        let (_, _, console, _) = sonar.release();
        assert_eq!(console.output, vec!["Starting readings...", "22:10:00 - 0 cm", "22:10:00 - 0 cm"]);
    }

    #[test]
    fn stop_halts_readings_and_repeated_stop_is_silent() {
        let mut sonar = canned_loop(&[b's', b'p', b'p'], vec![Ok(Distance::from_echo_us(580))]);
        steps(&mut sonar, 4);

        assert!(!sonar.is_active());
        let (sensor, _, console, _) = sonar.release();
        assert_eq!(
            console.output,
            vec!["Starting readings...", "22:10:00 - 10 cm", "Stopping readings..."]
        );
        assert_eq!(sensor.calls, 1);
    }

    #[test]
    fn timeout_is_reported_as_failure() {
        let readings = vec![Err(HCSR04Error::EchoTimeout(EchoPhase::Rising))];
        let mut sonar = canned_loop(&[b's'], readings);
        steps(&mut sonar, 1);

        let (_, _, console, _) = sonar.release();
        assert_eq!(console.output, vec!["Starting readings...", "22:10:00 - Failure"]);
    }

    #[test]
    fn reading_carries_the_current_time() {
        let clock = SimClock::new(0);
        let mut sonar = SonarLoop::new(
            CannedSensor { readings: vec![Ok(Distance::from_echo_us(580))].into(), calls: 0 },
            SoftRtc::new(clock.clone(), default_rtc_seed()),
            MockConsole::with_input(&[b's']),
            RecordingDelay::default(),
            LoopTiming::default(),
        );

        clock.advance(3_725 * 1_000_000);
        sonar.step();

        let (_, _, console, _) = sonar.release();
        assert_eq!(console.output[1], "23:12:05 - 10 cm");
    }

    #[test]
    fn failed_console_read_counts_as_no_command() {
        let mut sonar = canned_loop(&[], vec![Ok(Distance::from_echo_us(580))]);
        sonar.console.input = vec![Err(ConsoleFault), Ok(Some(b's'))].into();

        sonar.step();
        assert!(!sonar.is_active());
        assert!(sonar.console.output.is_empty());
        assert_eq!(sonar.sensor.calls, 0);

        sonar.step();
        assert!(sonar.is_active());
        let (_, _, console, _) = sonar.release();
        assert_eq!(console.output, vec!["Starting readings...", "22:10:00 - 10 cm"]);
    }

    #[test]
    fn failed_console_write_keeps_the_loop_going() {
        let mut sonar = canned_loop(&[b's'], vec![Ok(Distance::from_echo_us(580))]);
        sonar.console.fail_writes = true;
        steps(&mut sonar, 1);

        assert!(sonar.is_active());
        let (sensor, _, console, delay) = sonar.release();
        assert_eq!(sensor.calls, 1);
        assert_eq!(delay.total_ns, 1_000_000_000);
        assert_eq!(console.failed_writes, 2);
        assert!(console.output.is_empty());
    }

    #[test]
    fn unreadable_wall_clock_still_prints_the_reading() {
        let clock = SimClock::new(0);
        let mut sonar = SonarLoop::new(
            CannedSensor { readings: vec![Ok(Distance::from_echo_us(580))].into(), calls: 0 },
            SoftRtc::new(clock.clone(), chrono::NaiveDateTime::MAX),
            MockConsole::with_input(&[b's']),
            RecordingDelay::default(),
            LoopTiming::default(),
        );

        clock.advance(1_000_000);
        sonar.step();

        let (_, _, console, _) = sonar.release();
        assert_eq!(console.output, vec!["Starting readings...", "--:--:-- - 10 cm"]);
    }

    fn sensor_loop(echo: ScriptedEcho, clock: &SimClock)
        -> TestLoop<HCSR04<RecordingTrigger, ScriptedEcho, SimClock, RecordingDelay>> {
        let sensor = HCSR04::new(RecordingTrigger::default(), echo, clock.clone(), RecordingDelay::default());
        SonarLoop::new(
            sensor,
            SoftRtc::new(clock.clone(), default_rtc_seed()),
            MockConsole::with_input(&[b's']),
            RecordingDelay::default(),
            LoopTiming::default(),
        )
    }

    #[test]
    fn end_to_end_580us_echo_is_10cm() {
        let clock = SimClock::new(0);
        let mut sonar = sensor_loop(ScriptedEcho::pulse(&clock, 200, 580), &clock);
        sonar.step();

        let (sensor, _, console, _) = sonar.release();
        assert_eq!(console.output, vec!["Starting readings...", "22:10:00 - 10 cm"]);
        assert_eq!(sensor.timeout_us(), 30_000);
    }

    #[test]
    fn end_to_end_coinciding_edges_are_0cm() {
        let clock = SimClock::new(0);
        let mut sonar = sensor_loop(ScriptedEcho::pulse(&clock, 0, 0), &clock);
        sonar.step();

        let (_, _, console, _) = sonar.release();
        assert_eq!(console.output[1], "22:10:00 - 0 cm");
    }

    #[test]
    fn end_to_end_missing_echo_prints_failure() {
        let clock = SimClock::new(0);
        let mut sonar = sensor_loop(ScriptedEcho::idle(&clock, false), &clock);
        sonar.step();

        let (_, _, console, _) = sonar.release();
        assert_eq!(console.output[1], "22:10:00 - Failure");
    }

    #[test]
    fn end_to_end_echo_pin_error_prints_failure() {
        let clock = SimClock::new(0);
        let mut sonar = sensor_loop(ScriptedEcho::pulse(&clock, 200, 580).failing_at(1), &clock);
        sonar.step();

        let (_, _, console, _) = sonar.release();
        assert_eq!(console.output, vec!["Starting readings...", "22:10:00 - Failure"]);
    }
}
