//! Sonar logger firmware. Type `s` on the console to start taking a reading
//! per second and `p` to stop.
//!
//! The sensor trigger goes on GPIO2 and the echo on GPIO3, the console is
//! UART0 (TX: Pin 16, RX: Pin 17).

#[cfg(target_os = "espidf")]
fn main() -> Result<(), sonar_logger::sonar_error::SonarError> {
    use sonar_logger::config::SonarConfig;

    esp_idf_svc::log::EspLogger::initialize_default();

    match sonar_logger::firmware::run(SonarConfig::default())? {}
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("sonar_logger only runs on an ESP-IDF target, build with --target riscv32imac-esp-espidf");
    std::process::exit(1);
}
