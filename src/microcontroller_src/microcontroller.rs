use esp_idf_svc::hal::delay::Delay;
use crate::{
    gpio::*,
    microcontroller_src::peripherals::*,
    serial::{I2CError, I2CMaster, UARTError, UART},
    utils::clock::EspMicrosClock,
};

/// Primary abstraction for interacting with the microcontroller, providing access to the pins,
/// buses and time sources the sonar logger needs.
///
/// - `peripherals`: An instance of `Peripherals`, keeping track of which pins and buses were already claimed.
pub struct Microcontroller {
    peripherals: Peripherals,
}

impl Microcontroller {

    /// Creates a new Microcontroller instance
    ///
    /// # Returns
    ///
    /// The new Microcontroller
    pub fn new() -> Self{
        esp_idf_svc::sys::link_patches();
        Microcontroller{
            peripherals: Peripherals::new(),
        }
    }

    /// Creates a DigitalIn on the ESP pin with number 'pin_num' to read digital inputs.
    /// The pin is pulled down.
    ///
    /// # Arguments
    ///
    /// - `pin_num`: The number of the pin on the microcontroller to configure as a digital input.
    ///
    /// # Errors
    ///
    /// `DigitalInError::InvalidPeripheral` if the pin does not exist or was already taken.
    pub fn set_pin_as_digital_in<'a>(&mut self, pin_num: usize) -> Result<DigitalIn<'a>, DigitalInError>  {
        let pin_peripheral = self.peripherals.get_digital_pin(pin_num);
        DigitalIn::new(pin_peripheral)
    }

    /// Creates a DigitalOut on the ESP pin with number 'pin_num' to write digital outputs.
    /// The pin starts Low.
    ///
    /// # Arguments
    ///
    /// - `pin_num`: The number of the pin on the microcontroller to configure as a digital output.
    ///
    /// # Errors
    ///
    /// `DigitalOutError::InvalidPeripheral` if the pin does not exist or was already taken.
    pub fn set_pin_as_digital_out<'a>(&mut self, pin_num: usize) -> Result<DigitalOut<'a>, DigitalOutError> {
        let pin_peripheral = self.peripherals.get_digital_pin(pin_num);
        DigitalOut::new(pin_peripheral)
    }

    /// Configures the specified pins for I2C master mode.
    ///
    /// # Arguments
    ///
    /// - `sda_pin`: The pin number to be used as the SDA (Serial Data) line.
    /// - `scl_pin`: The pin number to be used as the SCL (Serial Clock) line.
    ///
    /// # Errors
    ///
    /// `I2CError::InvalidPeripheral` if the I2C bus was already taken.
    pub fn set_pins_for_i2c_master<'a>(&mut self, sda_pin: usize, scl_pin: usize) -> Result<I2CMaster<'a>, I2CError> {
        let (i2c_peripheral, sda_peripheral, scl_peripheral) = self.peripherals
            .get_i2c_with_pins(sda_pin, scl_pin)
            .ok_or(I2CError::InvalidPeripheral)?;

        I2CMaster::new(sda_peripheral, scl_peripheral, i2c_peripheral)
    }

    /// Configures the specified pins for a UART with a custom baudrate.
    ///
    /// # Arguments
    ///
    /// - `tx_pin`: The pin number to be used for UART transmission (TX).
    /// - `rx_pin`: The pin number to be used for UART reception (RX).
    /// - `uart_num`: The UART number to be configured.
    /// - `baudrate`: The baud rate for the UART communication.
    ///
    /// # Errors
    ///
    /// `UARTError::InvalidUartNumber` if the UART does not exist or was already taken.
    pub fn set_pins_for_uart<'a>(&mut self, tx_pin: usize, rx_pin: usize, uart_num: usize, baudrate: u32) -> Result<UART<'a>, UARTError> {
        let (uart_peripheral, tx_peripheral, rx_peripheral) = self.peripherals
            .get_uart_with_pins(uart_num, tx_pin, rx_pin)
            .ok_or(UARTError::InvalidUartNumber)?;

        UART::new(tx_peripheral, rx_peripheral, uart_peripheral, baudrate)
    }

    /// Monotonic microsecond clock backed by the esp timer
    pub fn micros_clock(&self) -> EspMicrosClock {
        EspMicrosClock
    }

    /// Delay that busy waits short periods and yields to FreeRTOS on longer ones
    pub fn delay(&self) -> Delay {
        Delay::new_default()
    }
}

impl Default for Microcontroller {
    fn default() -> Self {
        Self::new()
    }
}
