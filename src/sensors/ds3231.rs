use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use embedded_hal::i2c::I2c;

use crate::rtc::WallClock;

const DS3231_ADDR   : u8 = 0x68;
const SECONDS_ADDR  : u8 = 0x00;
const CLOCK_REGISTERS: usize = 7;
const CENTURY_BASE: i32 = 2000;

#[derive(Debug, PartialEq, Eq)]
pub enum DS3231Error<E> {
    I2C(E),
    YearOutOfRange(i32),
    InvalidRegisters,
}

/// Driver for the DS3231 battery backed RTC. The clock is always kept in
/// 24 hour mode and only years 2000 to 2099 can be stored.
pub struct DS3231<I> {
    i2c: I,
}

impl<I: I2c> DS3231<I> {
    pub fn new(i2c: I) -> DS3231<I> {
        DS3231 { i2c }
    }

    /// Gives back the bus
    pub fn release(self) -> I {
        self.i2c
    }

    /// Writes every clock register in a single transfer starting at the seconds register
    pub fn set_time(&mut self, date_time: NaiveDateTime) -> Result<(), DS3231Error<I::Error>> {
        let registers = encode_registers(date_time)?;
        let mut frame = [0_u8; CLOCK_REGISTERS + 1];
        frame[0] = SECONDS_ADDR;
        frame[1..].copy_from_slice(&registers);
        self.i2c.write(DS3231_ADDR, &frame).map_err(DS3231Error::I2C)
    }

    pub fn read_time(&mut self) -> Result<NaiveDateTime, DS3231Error<I::Error>> {
        let mut data = [0_u8; CLOCK_REGISTERS];
        self.i2c.write_read(DS3231_ADDR, &[SECONDS_ADDR], &mut data).map_err(DS3231Error::I2C)?;
        decode_registers(data)
    }
}

impl<I: I2c> WallClock for DS3231<I> {
    type Error = DS3231Error<I::Error>;

    fn set_datetime(&mut self, date_time: NaiveDateTime) -> Result<(), Self::Error> {
        self.set_time(date_time)
    }

    fn datetime(&mut self) -> Result<NaiveDateTime, Self::Error> {
        self.read_time()
    }
}

fn decimal_to_bcd(decimal: u8) -> u8 {
    ((decimal / 10) << 4) | (decimal % 10)
}

fn bcd_to_decimal(bcd: u8) -> u8 {
    (bcd & 0x0F) + ((bcd >> 4) * 10)
}

fn encode_registers<E>(date_time: NaiveDateTime) -> Result<[u8; CLOCK_REGISTERS], DS3231Error<E>> {
    let year = date_time.year();
    if !(CENTURY_BASE..CENTURY_BASE + 100).contains(&year) {
        return Err(DS3231Error::YearOutOfRange(year));
    }

    // Every field fits in a u8 once the century is removed
    Ok([
        decimal_to_bcd(date_time.second() as u8),
        decimal_to_bcd(date_time.minute() as u8),
        decimal_to_bcd(date_time.hour() as u8),
        date_time.weekday().number_from_monday() as u8,
        decimal_to_bcd(date_time.day() as u8),
        decimal_to_bcd(date_time.month() as u8),
        decimal_to_bcd((year - CENTURY_BASE) as u8),
    ])
}

fn decode_registers<E>(data: [u8; CLOCK_REGISTERS]) -> Result<NaiveDateTime, DS3231Error<E>> {
    // Masks drop the oscillator flag, the 12/24h bit and the century bit
    let secs = bcd_to_decimal(data[0] & 0x7f);
    let mins = bcd_to_decimal(data[1] & 0x7f);
    let hrs = bcd_to_decimal(data[2] & 0x3f);
    let day_number = bcd_to_decimal(data[4] & 0x3f);
    let month = bcd_to_decimal(data[5] & 0x1f);
    let yr = bcd_to_decimal(data[6]);

    NaiveDate::from_ymd_opt(CENTURY_BASE + yr as i32, month as u32, day_number as u32)
        .and_then(|date| date.and_hms_opt(hrs as u32, mins as u32, secs as u32))
        .ok_or(DS3231Error::InvalidRegisters)
}
