use chrono::Timelike;

use crate::sensors::Measurement;
use super::Transition;

pub const PROMPT_LINE: &str = "Type 's' to start readings.";
pub const STARTED_LINE: &str = "Starting readings...";
pub const STOPPED_LINE: &str = "Stopping readings...";
pub const FAILURE_MARKER: &str = "Failure";

/// Printed in place of the time when the wall clock could not be read
const UNKNOWN_TIME: &str = "--:--:--";

pub fn transition_line(transition: Transition) -> &'static str {
    match transition {
        Transition::Started => STARTED_LINE,
        Transition::Stopped => STOPPED_LINE,
    }
}

/// `HH:MM:SS - <N> cm` or `HH:MM:SS - Failure`
pub fn reading_line<T: Timelike>(time: Option<T>, measurement: &Measurement) -> String {
    let time = match time {
        Some(time) => format!("{:02}:{:02}:{:02}", time.hour(), time.minute(), time.second()),
        None => UNKNOWN_TIME.to_string(),
    };

    match measurement {
        Ok(distance) => format!("{} - {} cm", time, distance.cm()),
        Err(_) => format!("{} - {}", time, FAILURE_MARKER),
    }
}
