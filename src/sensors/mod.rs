mod ds3231;
mod hc_sr04;

pub use ds3231::*;
pub use hc_sr04::*;

/// Anything that can produce one distance reading on demand
pub trait RangeSensor {
    fn measure(&mut self) -> Measurement;
}
