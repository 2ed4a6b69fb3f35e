use std::mem;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio::*;

const PIN_COUNT: usize = 24;
const DIGITAL_PINS_BOUNDS: (usize, usize) = (0,23);
const UART_COUNT: usize = 2;
const UART_BOUNDS: (usize, usize) = (0, 1);

#[cfg(target_os = "espidf")]
#[derive(Debug)]
pub enum PeripheralError {
    NotAPin
}

/// Represents the esp32 Peripheral allowing to instanciate diferent Peripheral Types
#[derive(Debug, Default, PartialEq, Eq)]
pub enum Peripheral{
    Pin(u8),
    I2C,
    Uart(u8),
    #[default]
    None
}

impl Peripheral {
    fn take(&mut self) -> Peripheral {
        mem::take(self)
    }

    /// If the Peripheral is a Pin returns the corresponding AnyIoPin.
    /// If not it returns PeripheralError::NotAPin
    #[cfg(target_os = "espidf")]
    pub fn into_any_io_pin(self) -> Result<AnyIOPin, PeripheralError> {
        let pin = match self {
            Peripheral::Pin(pin_num) => match pin_num{
                0 => unsafe {Gpio0::new().downgrade()},
                1 => unsafe {Gpio1::new().downgrade()},
                2 => unsafe {Gpio2::new().downgrade()},
                3 => unsafe {Gpio3::new().downgrade()},
                4 => unsafe {Gpio4::new().downgrade()},
                5 => unsafe {Gpio5::new().downgrade()},
                6 => unsafe {Gpio6::new().downgrade()},
                7 => unsafe {Gpio7::new().downgrade()},
                8 => unsafe {Gpio8::new().downgrade()},
                9 => unsafe {Gpio9::new().downgrade()},
                10 => unsafe {Gpio10::new().downgrade()},
                11 => unsafe {Gpio11::new().downgrade()},
                12 => unsafe {Gpio12::new().downgrade()},
                13 => unsafe {Gpio13::new().downgrade()},
                15 => unsafe {Gpio15::new().downgrade()},
                16 => unsafe {Gpio16::new().downgrade()},
                17 => unsafe {Gpio17::new().downgrade()},
                18 => unsafe {Gpio18::new().downgrade()},
                19 => unsafe {Gpio19::new().downgrade()},
                20 => unsafe {Gpio20::new().downgrade()},
                21 => unsafe {Gpio21::new().downgrade()},
                22 => unsafe {Gpio22::new().downgrade()},
                23 => unsafe {Gpio23::new().downgrade()},
                _ => return Err(PeripheralError::NotAPin)
            },
            _ => return Err(PeripheralError::NotAPin),
        };
        Ok(pin)
    }
}

/// Represents the peripherals of the esp32C6 the sonar logger uses. Subsequent gets of
/// the same peripheral will return Peripheral::None, so a pin can only be claimed once.
pub struct Peripherals {
    pins: [Peripheral;PIN_COUNT],
    i2c: Peripheral,
    uart: [Peripheral; UART_COUNT],
}

impl Peripherals {
    pub fn new() -> Peripherals {
        let mut pins: [Peripheral; PIN_COUNT] = core::array::from_fn(|pin| Peripheral::Pin(pin as u8));
        // GPIO14 is not bonded out on the C6
        pins[14] = Peripheral::None;
        let i2c: Peripheral = Peripheral::I2C;
        let uart: [Peripheral; UART_COUNT] = [Peripheral::Uart(0), Peripheral::Uart(1)];
        Peripherals {
            pins,
            i2c,
            uart,
        }
    }

    pub fn get_digital_pin(&mut self, pin_num: usize) -> Peripheral {
        if pin_num >= DIGITAL_PINS_BOUNDS.0 && pin_num <= DIGITAL_PINS_BOUNDS.1 {
            return self.pins[pin_num].take()
        }
        Peripheral::None
    }

    pub fn get_i2c(&mut self) -> Peripheral {
        self.i2c.take()
    }

    pub fn get_uart(&mut self, uart_num: usize) -> Peripheral {
        if uart_num >= UART_BOUNDS.0 && uart_num <= UART_BOUNDS.1 {
            return self.uart[uart_num].take()
        }
        Peripheral::None
    }

    /// Takes the I2C bus together with its SDA and SCL pins. If the bus was
    /// already taken returns None and the pins are left untouched.
    pub fn get_i2c_with_pins(&mut self, sda_pin: usize, scl_pin: usize) -> Option<(Peripheral, Peripheral, Peripheral)> {
        let i2c = self.get_i2c();
        if i2c == Peripheral::None {
            return None
        }
        Some((i2c, self.get_digital_pin(sda_pin), self.get_digital_pin(scl_pin)))
    }

    /// Takes UART `uart_num` together with its TX and RX pins. If the UART does
    /// not exist or was already taken returns None and the pins are left untouched.
    pub fn get_uart_with_pins(&mut self, uart_num: usize, tx_pin: usize, rx_pin: usize) -> Option<(Peripheral, Peripheral, Peripheral)> {
        let uart = self.get_uart(uart_num);
        if uart == Peripheral::None {
            return None
        }
        Some((uart, self.get_digital_pin(tx_pin), self.get_digital_pin(rx_pin)))
    }
}

impl Default for Peripherals {
    fn default() -> Self {
        Self::new()
    }
}
