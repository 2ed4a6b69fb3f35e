mod command;
mod report;

pub use command::*;
pub use report::*;

use core::fmt::Debug;

/// Byte oriented user console: single key commands in, text lines out
pub trait Console {
    type Error: Debug;

    /// Waits up to `timeout_ms` for one byte. `Ok(None)` when nothing arrived.
    fn read_byte(&mut self, timeout_ms: u32) -> Result<Option<u8>, Self::Error>;

    /// Writes `line` followed by a line terminator
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}
