#![warn(missing_docs)]
//! perfharness Report - Console and Log Output
//!
//! Two output surfaces:
//! - Progress table on the console (human-readable, not meant for parsing)
//! - Timing log for the visualization page (one record per subtask)

mod log;
mod table;

pub use log::{TimingLog, format_log_record};
pub use table::{COLUMN_WIDTH, HeaderLayout, ProgressTable};
