mod soft_rtc;

pub use soft_rtc::*;

use chrono::NaiveDateTime;
use core::fmt::Debug;

/// Calendar date and time source used to timestamp readings
pub trait WallClock {
    type Error: Debug;

    /// Moves the clock to `date_time`
    fn set_datetime(&mut self, date_time: NaiveDateTime) -> Result<(), Self::Error>;

    /// Current date and time
    fn datetime(&mut self) -> Result<NaiveDateTime, Self::Error>;
}
