use embassy_time::{Duration, Instant};
use nowlink_api::time::TimeProvider;

/// Milliseconds since the provider was created, read from the embassy
/// time driver.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedTimeProvider {
    boot: Instant,
}

impl EmbeddedTimeProvider {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Counts from `boot` instead of now
    pub fn starting_at(boot: Instant) -> Self {
        Self { boot }
    }

    pub fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.boot)
    }
}

impl TimeProvider for EmbeddedTimeProvider {
    fn uptime_ms(&self) -> u64 {
        self.elapsed().as_millis()
    }
}

impl Default for EmbeddedTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}
