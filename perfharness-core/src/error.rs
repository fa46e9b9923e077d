//! Harness errors

use perfharness_stats::StatsError;
use thiserror::Error;

/// Boxed error raised by a workload
pub type WorkloadError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while measuring
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Console or timing log could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Attempt statistics could not be computed
    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    /// A configuration count was zero
    #[error("Invalid configuration: {field} must be a positive integer")]
    InvalidConfig {
        /// Offending field
        field: &'static str,
    },

    /// A suite's workload failed
    #[error("Workload failed: {0}")]
    Workload(#[source] WorkloadError),
}

impl HarnessError {
    /// Wrap a workload failure so it can leave a suite's `run` function
    pub fn workload(err: impl Into<WorkloadError>) -> Self {
        HarnessError::Workload(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_workload_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad varint");
        let err = HarnessError::workload(io);

        assert_eq!(err.to_string(), "Workload failed: bad varint");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_workload_from_message() {
        let err = HarnessError::workload("checksum mismatch");
        assert!(matches!(err, HarnessError::Workload(_)));
    }

    #[test]
    fn test_invalid_config_message() {
        let err = HarnessError::InvalidConfig {
            field: "run_count",
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: run_count must be a positive integer"
        );
    }
}
