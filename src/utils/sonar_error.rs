use crate::{
    gpio::{DigitalInError, DigitalOutError},
    serial::{I2CError, UARTError},
};

/// Errors that can stop the firmware while it is wiring up its peripherals.
/// Once the loop runs nothing is fatal.
#[derive(Debug)]
pub enum SonarError{
    DigitalInError(DigitalInError),
    DigitalOutError(DigitalOutError),
    I2CError(I2CError),
    UARTError(UARTError),
}

impl From<DigitalInError> for SonarError {
    fn from(value: DigitalInError) -> Self {
        SonarError::DigitalInError(value)
    }
}

impl From<DigitalOutError> for SonarError {
    fn from(value: DigitalOutError) -> Self {
        SonarError::DigitalOutError(value)
    }
}

impl From<I2CError> for SonarError {
    fn from(value: I2CError) -> Self {
        SonarError::I2CError(value)
    }
}

impl From<UARTError> for SonarError {
    fn from(value: UARTError) -> Self {
        SonarError::UARTError(value)
    }
}
