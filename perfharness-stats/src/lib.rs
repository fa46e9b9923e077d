#![warn(missing_docs)]
//! perfharness Statistical Engine
//!
//! Summarizes the attempt-level durations collected by the harness:
//! - Arithmetic mean and population standard deviation
//! - Relative standard deviation (measurement noise, in percent)
//! - Extremes of the attempt distribution

mod summary;

pub use summary::{Statistics, StatsError, compute_statistics, duration_micros};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_reexports() {
        let stats = compute_statistics(&[Duration::from_micros(10)]).unwrap();
        assert_eq!(stats.sample_count, 1);
        assert!((duration_micros(Duration::from_millis(1)) - 1000.0).abs() < f64::EPSILON);
    }
}
