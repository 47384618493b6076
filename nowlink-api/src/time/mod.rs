use core::cell::Cell;

/// Monotonic millisecond clock used for serial timeouts.
pub trait TimeProvider {
    fn uptime_ms(&self) -> u64;
}

impl<T: TimeProvider + ?Sized> TimeProvider for &T {
    fn uptime_ms(&self) -> u64 {
        (**self).uptime_ms()
    }
}

/// Clock that only moves when told to; for tests and simulations.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now_ms.set(ms);
    }
}

impl TimeProvider for ManualClock {
    fn uptime_ms(&self) -> u64 {
        self.now_ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(5);
        assert_eq!(clock.uptime_ms(), 5);
        clock.advance(10);
        assert_eq!((&clock).uptime_ms(), 15);
        clock.set(2);
        assert_eq!(clock.uptime_ms(), 2);
    }
}
