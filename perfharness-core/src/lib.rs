#![warn(missing_docs)]
//! perfharness Core - Measurement Runtime
//!
//! This crate provides the execution environment for micro-benchmarks:
//! - `Harness` running a workload in timed attempts of batched executions
//! - `Subtasks` for timing named portions of a workload separately
//! - Monotonic timing based on `std::time::Instant`
//! - The suite registry used by the CLI to discover benchmark drivers

mod config;
mod error;
mod harness;
mod measure;
mod subtask;
mod suite;

pub use config::HarnessConfig;
pub use error::{HarnessError, WorkloadError};
pub use harness::{Harness, LogSink, Measurement};
pub use measure::{Timer, time};
pub use subtask::Subtasks;
pub use suite::{REGISTRY_ANCHOR, SuiteDef, SuiteFn, registered_suites};

pub use perfharness_report::HeaderLayout;
pub use perfharness_stats::Statistics;
