mod i2c;
mod uart;

pub use i2c::*;
pub use uart::*;

use esp_idf_svc::sys::configTICK_RATE_HZ;

/// Converts microseconds into FreeRTOS ticks, rounding up so a short non zero
/// timeout never becomes a non blocking call.
pub(crate) fn micro_to_ticks(time_us: u32) -> u32 {
    let ticks = (time_us as u64 * configTICK_RATE_HZ as u64).div_ceil(1_000_000);
    ticks.min(u32::MAX as u64) as u32
}
