//! Monotonic Timing
//!
//! All harness timings come from `std::time::Instant`, which is monotonic:
//! wall-clock adjustments while a measurement runs do not affect elapsed
//! durations.

use std::time::{Duration, Instant};

/// Timer for measuring attempts and subtasks
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since the timer was started
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Run `f` once, returning its result together with how long it took
#[inline]
pub fn time<T, F>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let timer = Timer::start();
    let result = f();
    (result, timer.stop())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        std::thread::sleep(Duration::from_millis(10));
        let elapsed = timer.stop();

        // Should be at least 10ms
        assert!(elapsed >= Duration::from_millis(10));
        // Should be less than 1s (accounting for scheduling)
        assert!(elapsed < Duration::from_secs(1));
    }

    #[test]
    fn test_timer_is_monotonic() {
        let timer = Timer::start();
        let a = timer.stop();
        let b = timer.stop();
        assert!(b >= a);
    }

    #[test]
    fn test_time_returns_result() {
        let (value, elapsed) = time(|| {
            std::thread::sleep(Duration::from_millis(2));
            "done"
        });

        assert_eq!(value, "done");
        assert!(elapsed >= Duration::from_millis(2));
    }
}
