pub mod clock;

#[cfg(target_os = "espidf")]
pub mod sonar_error;
