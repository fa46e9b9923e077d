//! Harness configuration
//!
//! Both loop counts must be positive. [`HarnessConfig::validate`] reports the
//! first offending field; the harness itself clamps zero counts to 1 so that
//! a misconfigured run still terminates.

use crate::HarnessError;
use perfharness_report::HeaderLayout;
use serde::{Deserialize, Serialize};

/// Iteration counts and display options for a [`Harness`](crate::Harness)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Number of timed attempts per measurement (used for the stddev)
    #[serde(default = "default_measurement_count")]
    pub measurement_count: usize,
    /// Number of workload executions batched into one attempt
    #[serde(default = "default_run_count")]
    pub run_count: usize,
    /// Number of elements workloads put into repeated test data
    #[serde(default = "default_repeated_count")]
    pub repeated_count: usize,
    /// Layout of the console table header
    #[serde(default)]
    pub header: HeaderLayout,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            measurement_count: default_measurement_count(),
            run_count: default_run_count(),
            repeated_count: default_repeated_count(),
            header: HeaderLayout::default(),
        }
    }
}

fn default_measurement_count() -> usize {
    10
}
fn default_run_count() -> usize {
    100
}
fn default_repeated_count() -> usize {
    10
}

impl HarnessConfig {
    /// Check that both loop counts are positive integers.
    ///
    /// `repeated_count` may be zero: a workload over empty repeated data is
    /// still a valid workload.
    pub fn validate(&self) -> Result<(), HarnessError> {
        let fields = [
            ("measurement_count", self.measurement_count),
            ("run_count", self.run_count),
        ];
        match fields.into_iter().find(|(_, value)| *value == 0) {
            Some((field, _)) => Err(HarnessError::InvalidConfig { field }),
            None => Ok(()),
        }
    }

    /// Copy of this configuration with zero loop counts raised to 1
    pub(crate) fn clamped(mut self) -> Self {
        if self.measurement_count == 0 {
            tracing::warn!("measurement_count is 0, using 1");
            self.measurement_count = 1;
        }
        if self.run_count == 0 {
            tracing::warn!("run_count is 0, using 1");
            self.run_count = 1;
        }
        self
    }
}
