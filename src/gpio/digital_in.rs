use esp_idf_svc::hal::gpio::*;
use embedded_hal::digital::{self, ErrorKind, ErrorType};
pub use esp_idf_svc::hal::gpio::Pull;
use crate::microcontroller_src::peripherals::Peripheral;

#[derive(Debug)]
pub enum DigitalInError {
    CannotSetPullForPin,
    CannotSetPinAsInput,
    InvalidPeripheral,
}

impl digital::Error for DigitalInError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Driver for receiving digital inputs from a particular Pin
pub struct DigitalIn<'a>{
    pin_driver: PinDriver<'a, AnyIOPin, Input>,
}

impl <'a>DigitalIn<'a> {
    /// Create a new DigitalIn for a Pin, by default pull is set to Down so a
    /// disconnected echo line reads Low.
    pub fn new(per: Peripheral) -> Result<DigitalIn<'a>, DigitalInError> {
        let gpio = per.into_any_io_pin().map_err(|_| DigitalInError::InvalidPeripheral)?;
        let pin_driver = PinDriver::input(gpio).map_err(|_| DigitalInError::CannotSetPinAsInput)?;

        let mut digital_in = DigitalIn { pin_driver };
        digital_in.set_pull(Pull::Down)?;
        Ok(digital_in)
    }

    /// Set the pin Pull either to Pull Up or Down
    pub fn set_pull(&mut self, pull_type: Pull)-> Result<(), DigitalInError>{
        self.pin_driver.set_pull(pull_type).map_err(|_| DigitalInError::CannotSetPullForPin)
    }

    /// verifies if the pin level is High
    pub fn is_high(&self) -> bool{
        self.pin_driver.get_level() == Level::High
    }

    /// verifies if the pin level is Low
    pub fn is_low(&self) -> bool{
        self.pin_driver.get_level() == Level::Low
    }
}

impl<'a> ErrorType for DigitalIn<'a> {
    type Error = DigitalInError;
}

impl<'a> digital::InputPin for DigitalIn<'a> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(DigitalIn::is_high(self))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(DigitalIn::is_low(self))
    }
}
