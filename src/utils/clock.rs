/// Monotonic time source with microsecond resolution.
///
/// Used to bound the echo polling loops and to measure the echo pulse width,
/// and by [`crate::rtc::SoftRtc`] to advance its calendar.
pub trait MicrosClock {
    /// Microseconds elapsed since an arbitrary, fixed origin (usually boot).
    fn now_us(&self) -> u64;
}

/// [`MicrosClock`] backed by the ESP high resolution timer.
#[cfg(target_os = "espidf")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EspMicrosClock;

#[cfg(target_os = "espidf")]
impl MicrosClock for EspMicrosClock {
    fn now_us(&self) -> u64 {
        // esp_timer starts at zero on boot and never goes negative
        let now = unsafe { esp_idf_svc::sys::esp_timer_get_time() };
        now.max(0) as u64
    }
}
