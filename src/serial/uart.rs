use esp_idf_svc::hal::{gpio::AnyIOPin, uart::{config, UartDriver, UART0, UART1}, units::Hertz};
use crate::{console::Console, microcontroller_src::peripherals::Peripheral};
use super::micro_to_ticks;

const LINE_TERMINATOR: &[u8] = b"\r\n";

#[derive(Debug)]
pub enum UARTError{
    InvalidPin,
    InvalidUartNumber,
    DriverError,
    ReadError,
    WriteError,
}

/// 8N1 UART used as the user console
pub struct UART<'a> {
    driver: UartDriver<'a>,
}

impl <'a>UART<'a> {
    pub fn new(tx: Peripheral, rx: Peripheral, uart_peripheral: Peripheral, baudrate: u32) -> Result<UART<'a>, UARTError > {
        let rx_peripheral = rx.into_any_io_pin().map_err(|_| UARTError::InvalidPin)?;
        let tx_peripheral = tx.into_any_io_pin().map_err(|_| UARTError::InvalidPin)?;
        let config = config::Config::new().baudrate(Hertz(baudrate));

        let driver = match uart_peripheral {
            Peripheral::Uart(0) => UartDriver::new(
                unsafe{ UART0::new()},
                tx_peripheral,
                rx_peripheral,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &config,
            ),
            Peripheral::Uart(1) => UartDriver::new(
                unsafe{ UART1::new()},
                tx_peripheral,
                rx_peripheral,
                Option::<AnyIOPin>::None,
                Option::<AnyIOPin>::None,
                &config,
            ),
            _ => return Err(UARTError::InvalidUartNumber),
        }.map_err(|_| UARTError::DriverError)?;

        Ok(UART{driver})
    }

    pub fn write(&mut self, bytes_to_write: &[u8]) -> Result<usize, UARTError> {
        self.driver.write(bytes_to_write).map_err(|_| UARTError::WriteError)
    }

    /// Reads into `buffer` until it is full or `timeout_us` passes. Returns the amount of bytes read.
    pub fn read_with_timeout(&mut self, buffer: &mut [u8], timeout_us: u32) -> Result<usize, UARTError> {
        self.driver.read(buffer, micro_to_ticks(timeout_us)).map_err(|_| UARTError::ReadError)
    }

    /// Writes the whole buffer, retrying on partial writes
    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), UARTError> {
        while !bytes.is_empty() {
            let written = self.write(bytes)?;
            if written == 0 {
                return Err(UARTError::WriteError)
            }
            bytes = &bytes[written..];
        }
        Ok(())
    }
}

impl<'a> Console for UART<'a> {
    type Error = UARTError;

    fn read_byte(&mut self, timeout_ms: u32) -> Result<Option<u8>, Self::Error> {
        let mut buffer = [0_u8; 1];
        let read = self.read_with_timeout(&mut buffer, timeout_ms.saturating_mul(1_000))?;
        Ok((read > 0).then_some(buffer[0]))
    }

    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.write_all(line.as_bytes())?;
        self.write_all(LINE_TERMINATOR)
    }
}
