use esp_idf_svc::hal::gpio::*;
use embedded_hal::digital::{self, ErrorKind, ErrorType};
use crate::microcontroller_src::peripherals::Peripheral;

#[derive(Debug)]
pub enum DigitalOutError{
    CannotSetPinAsOutput,
    InvalidPin,
    InvalidPeripheral,
}

impl digital::Error for DigitalOutError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Driver to handle a digital output for a particular Pin
pub struct DigitalOut<'a>{
    pin_driver: PinDriver<'a, AnyIOPin, Output>,
}

impl <'a>DigitalOut<'a> {
    /// Creates a new DigitalOut for a Pin. The pin starts driven Low.
    pub fn new(per: Peripheral) -> Result<DigitalOut<'a>, DigitalOutError>{
        let gpio = per.into_any_io_pin().map_err(|_| DigitalOutError::InvalidPeripheral)?;
        let pin_driver = PinDriver::output(gpio).map_err(|_| DigitalOutError::CannotSetPinAsOutput)?;

        let mut digital_out = DigitalOut { pin_driver };
        digital_out.set_low()?;
        Ok(digital_out)
    }

    /// Sets the pin level either to High or Low
    pub fn set_level(&mut self, level: Level)->Result<(), DigitalOutError>{
        self.pin_driver.set_level(level).map_err(|_| DigitalOutError::InvalidPin)
    }

    /// Sets the current pin level in High
    pub fn set_high(&mut self)->Result<(), DigitalOutError>{
        self.set_level(Level::High)
    }

    /// Sets the current pin level in Low
    pub fn set_low(&mut self)->Result<(), DigitalOutError>{
        self.set_level(Level::Low)
    }
}

impl<'a> ErrorType for DigitalOut<'a> {
    type Error = DigitalOutError;
}

impl<'a> digital::OutputPin for DigitalOut<'a> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        DigitalOut::set_high(self)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        DigitalOut::set_low(self)
    }
}
