use web_time::Instant;

/// Monotonic nanosecond source for hosts that pump the runtime from a real
/// event loop. Tests bypass this and feed synthetic frame times directly.
pub struct FrameTimer {
    origin: Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_nanos(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
