use chrono::{NaiveDateTime, TimeDelta};

use crate::utils::clock::MicrosClock;
use super::WallClock;

#[derive(Debug, PartialEq, Eq)]
pub enum SoftRtcError {
    Overflow,
}

/// Wall clock kept in software: the last date set plus the monotonic time
/// elapsed since then. Loses its date on every reset.
pub struct SoftRtc<C> {
    clock: C,
    seed: NaiveDateTime,
    seeded_at_us: u64,
}

impl<C: MicrosClock> SoftRtc<C> {
    pub fn new(clock: C, seed: NaiveDateTime) -> SoftRtc<C> {
        let seeded_at_us = clock.now_us();
        SoftRtc { clock, seed, seeded_at_us }
    }
}

impl<C: MicrosClock> WallClock for SoftRtc<C> {
    type Error = SoftRtcError;

    fn set_datetime(&mut self, date_time: NaiveDateTime) -> Result<(), Self::Error> {
        self.seed = date_time;
        self.seeded_at_us = self.clock.now_us();
        Ok(())
    }

    fn datetime(&mut self) -> Result<NaiveDateTime, Self::Error> {
        let elapsed_us = self.clock.now_us().saturating_sub(self.seeded_at_us);
        let elapsed_us = i64::try_from(elapsed_us).map_err(|_| SoftRtcError::Overflow)?;
        self.seed
            .checked_add_signed(TimeDelta::microseconds(elapsed_us))
            .ok_or(SoftRtcError::Overflow)
    }
}
