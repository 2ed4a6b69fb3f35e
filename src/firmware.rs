use std::convert::Infallible;

use embedded_hal::delay::DelayNs;

use crate::{
    config::{RtcSource, SonarConfig},
    console::Console,
    rtc::{SoftRtc, WallClock},
    sensors::{RangeSensor, DS3231, HCSR04},
    sonar::SonarLoop,
    utils::sonar_error::SonarError,
    Microcontroller,
};

/// Claims the pins and buses named in `config` and runs the sonar loop forever.
///
/// # Errors
///
/// Only setup can fail, for instance when a pin is invalid or used twice.
pub fn run(config: SonarConfig) -> Result<Infallible, SonarError> {
    let mut micro = Microcontroller::new();

    let trig = micro.set_pin_as_digital_out(config.trigger_pin)?;
    let echo = micro.set_pin_as_digital_in(config.echo_pin)?;
    let sensor = HCSR04::new(trig, echo, micro.micros_clock(), micro.delay())
        .with_timeout_us(config.echo_timeout_us)
        .with_trigger_pulse_us(config.trigger_pulse_us);

    let console = &config.console;
    let uart = micro.set_pins_for_uart(console.tx_pin, console.rx_pin, console.uart_num, console.baudrate)?;
    log::info!(
        "HC-SR04 on trigger GPIO{} / echo GPIO{}, console on UART{}",
        config.trigger_pin, config.echo_pin, console.uart_num
    );

    match config.rtc.source {
        RtcSource::Internal => {
            let rtc = SoftRtc::new(micro.micros_clock(), config.rtc.seed);
            run_loop(sensor, rtc, uart, micro.delay(), &config)
        }
        RtcSource::Ds3231 { sda_pin, scl_pin } => {
            let i2c = micro.set_pins_for_i2c_master(sda_pin, scl_pin)?;
            run_loop(sensor, DS3231::new(i2c), uart, micro.delay(), &config)
        }
    }
}

fn run_loop<S, W, C, D>(sensor: S, rtc: W, console: C, delay: D, config: &SonarConfig) -> !
where
    S: RangeSensor,
    W: WallClock,
    C: Console,
    D: DelayNs,
{
    let mut sonar = SonarLoop::new(sensor, rtc, console, delay, config.timing);
    sonar.boot(config.rtc.seed_on_boot.then_some(config.rtc.seed));
    sonar.run()
}
