#![warn(missing_docs)]
//! # perfharness
//!
//! Micro-benchmark timing harness with per-subtask timings and a log for
//! external visualization.
//!
//! - **Batched attempts**: each attempt runs the workload `run_count` times
//!   back to back, amortizing timer overhead
//! - **Subtasks**: named portions of a workload are timed separately and
//!   printed as mean-per-run microseconds for every attempt
//! - **Noise report**: the relative standard deviation of attempt durations
//!   is printed after each measurement
//! - **Visualization log**: raw subtask timings are appended to a
//!   line-oriented log, one record per subtask
//!
//! ## Quick Start
//!
//! ```ignore
//! use perfharness::prelude::*;
//!
//! fn run_parsing(harness: &mut Harness<LogSink>) -> Result<(), HarnessError> {
//!     let input = "1,2,3,4,5".repeat(harness.repeated_count());
//!     harness.measure(|s| {
//!         let fields = s.measure_subtask("Split", || input.split(',').count());
//!         s.measure_subtask("Sum", || (0..fields).sum::<usize>());
//!     })?;
//!     Ok(())
//! }
//!
//! register_suite!("parsing", run_parsing, description = "split and sum");
//!
//! fn main() -> anyhow::Result<()> {
//!     perfharness::run()
//! }
//! ```

// Re-export core types
pub use perfharness_core::{
    Harness, HarnessConfig, HarnessError, HeaderLayout, LogSink, Measurement, Statistics,
    Subtasks, SuiteDef, SuiteFn, Timer, WorkloadError, registered_suites, time,
};

// Re-export output writers
pub use perfharness_report::{ProgressTable, TimingLog, format_log_record};

// Re-export stats
pub use perfharness_stats::{StatsError, compute_statistics, duration_micros};

/// Internal re-exports for macro use
#[doc(hidden)]
pub mod internal {
    pub use inventory;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Harness, HarnessConfig, HarnessError, LogSink, Subtasks, register_suite};
}

/// Register a suite so the CLI can discover and run it.
///
/// ```ignore
/// register_suite!("json", run_json);
/// register_suite!("json_large", run_json_large, description = "10k fields", tags = ["slow"]);
/// ```
#[macro_export]
macro_rules! register_suite {
    (@description) => {
        ""
    };
    (@description $description:expr) => {
        $description
    };
    (
        $id:expr, $run_fn:path
        $(, description = $description:expr)?
        $(, tags = [$($tag:expr),* $(,)?])?
        $(,)?
    ) => {
        $crate::internal::inventory::submit! {
            $crate::SuiteDef {
                id: $id,
                description: $crate::register_suite!(@description $($description)?),
                tags: &[$($($tag),*)?],
                run_fn: $run_fn,
            }
        }
    };
}

/// Run the perfharness CLI over every registered suite.
///
/// Call this from your benchmark binary's `main()`:
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     perfharness::run()
/// }
/// ```
pub use perfharness_cli::run;
