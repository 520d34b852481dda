use web_time::Instant;

/// Monotonic wall clock for hosts that drive the runtime in real time.
///
/// Tests drive [`crate::Runtime::advance_to`] with synthetic timestamps instead.
#[derive(Debug, Clone, Copy)]
pub struct HostClock {
    origin: Instant,
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Nanoseconds elapsed since this clock was created.
    pub fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}
