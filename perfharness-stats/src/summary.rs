//! Summary Statistics
//!
//! Mean and dispersion of attempt durations. The standard deviation is the
//! population variant: every attempt of a measurement is observed, so the
//! divisor is `n`. A single attempt therefore has a stddev of exactly zero.

use std::time::Duration;
use thiserror::Error;

/// Errors produced while summarizing timings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    /// No durations were supplied
    #[error("Cannot compute statistics of an empty timing series")]
    Empty,
}

/// Mean and standard deviation of a series of attempt durations.
///
/// All values are in microseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub stddev: f64,
    /// Fastest attempt
    pub min: f64,
    /// Slowest attempt
    pub max: f64,
    /// Number of attempts summarized
    pub sample_count: usize,
}

impl Statistics {
    /// Relative standard deviation (coefficient of variation) in percent.
    ///
    /// Returns `0.0` when the mean is zero, which only happens for workloads
    /// too fast for the clock to resolve.
    pub fn relative_stddev(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            self.stddev / self.mean * 100.0
        }
    }
}

/// Convert a duration to fractional microseconds
#[inline]
pub fn duration_micros(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000_000.0
}

/// Compute mean and population standard deviation of the given durations
pub fn compute_statistics(timings: &[Duration]) -> Result<Statistics, StatsError> {
    if timings.is_empty() {
        return Err(StatsError::Empty);
    }

    let micros: Vec<f64> = timings.iter().copied().map(duration_micros).collect();
    let n = micros.len() as f64;

    let mean = micros.iter().sum::<f64>() / n;
    let variance = micros.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

    let min = micros.iter().copied().fold(f64::INFINITY, f64::min);
    let max = micros.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(Statistics {
        mean,
        stddev: variance.sqrt(),
        min,
        max,
        sample_count: micros.len(),
    })
}
