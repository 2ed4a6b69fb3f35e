use esp_idf_svc::{hal::{i2c::{I2cConfig, I2cDriver, I2C0}, units::FromValueType}, sys::{EspError, ESP_ERR_INVALID_ARG, ESP_ERR_NO_MEM, ESP_ERR_TIMEOUT}};
use embedded_hal::i2c::{self, ErrorKind, ErrorType, Operation};
use crate::microcontroller_src::peripherals::Peripheral;

const DEFAULT_BAUDRATE: u32 = 100;

#[derive(Debug)]
pub enum I2CError {
    InvalidPin,
    InvalidPeripheral,
    BufferTooSmall,
    InvalidArg,
    DriverError,
    TimeoutError,
}

impl i2c::Error for I2CError {
    fn kind(&self) -> ErrorKind {
        match self {
            I2CError::BufferTooSmall => ErrorKind::Overrun,
            _ => ErrorKind::Other,
        }
    }
}

fn map_transfer_error(error: EspError) -> I2CError {
    match error.code() {
        ESP_ERR_INVALID_ARG => I2CError::InvalidArg,
        ESP_ERR_NO_MEM => I2CError::BufferTooSmall,
        ESP_ERR_TIMEOUT => I2CError::TimeoutError,
        _ => I2CError::DriverError,
    }
}

/// I2C bus master at 100kHz, exposed through the `embedded-hal` I2c trait
pub struct I2CMaster<'a> {
    driver: I2cDriver<'a>,
}

impl <'a>I2CMaster<'a> {
    pub fn new(sda_per: Peripheral, scl_per: Peripheral, i2c_per: Peripheral) -> Result<I2CMaster<'a>, I2CError> {
        if i2c_per != Peripheral::I2C {
            return Err(I2CError::InvalidPeripheral)
        }
        let sda = sda_per.into_any_io_pin().map_err(|_| I2CError::InvalidPin)?;
        let scl = scl_per.into_any_io_pin().map_err(|_| I2CError::InvalidPin)?;

        let config = I2cConfig::new().baudrate(DEFAULT_BAUDRATE.kHz().into());
        let driver = I2cDriver::new(unsafe { I2C0::new() }, sda, scl, &config).map_err(|error| match error.code() {
            ESP_ERR_INVALID_ARG => I2CError::InvalidArg,
            _ => I2CError::DriverError,
        })?;

        Ok(
            I2CMaster { driver }
        )
    }
}

impl<'a> ErrorType for I2CMaster<'a> {
    type Error = I2CError;
}

impl<'a> i2c::I2c for I2CMaster<'a> {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        i2c::I2c::transaction(&mut self.driver, address, operations).map_err(|error| map_transfer_error(error.cause()))
    }
}
