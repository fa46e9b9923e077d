//! Subtask bookkeeping
//!
//! Workloads receive a `&mut Subtasks` and wrap the portions they want timed
//! separately in [`Subtasks::measure_subtask`]. Durations accumulate per name
//! across every workload execution of an attempt.

use crate::measure::time;
use fxhash::FxHashMap;
use std::time::Duration;

/// Records named subtask timings for the attempt in progress
#[derive(Debug, Default)]
pub struct Subtasks {
    // Every registration of the current workload execution, duplicates included
    names: Vec<String>,
    // Distinct names of the attempt, first registration first
    columns: Vec<String>,
    // Accumulated per attempt
    current: FxHashMap<String, Duration>,
}

impl Subtasks {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Time `func` as the subtask `name` and return its result unchanged.
    ///
    /// Calling this several times with the same name in one workload
    /// execution adds the durations together.
    #[inline]
    pub fn measure_subtask<T, F>(&mut self, name: &str, func: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.names.push(name.to_owned());
        if !self.columns.iter().any(|c| c == name) {
            self.columns.push(name.to_owned());
        }

        let (result, elapsed) = time(func);
        *self.current.entry(name.to_owned()).or_default() += elapsed;
        result
    }

    /// Names registered during the latest workload execution, in order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Time accumulated by `name` in the current attempt
    pub fn elapsed(&self, name: &str) -> Duration {
        self.current.get(name).copied().unwrap_or_default()
    }

    /// Distinct names registered in the current attempt, in order of first
    /// registration. A subtask skipped by some executions still appears.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub(crate) fn begin_attempt(&mut self) {
        self.names.clear();
        self.columns.clear();
        self.current.clear();
    }

    pub(crate) fn begin_execution(&mut self) {
        self.names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_returns_result() {
        let mut subtasks = Subtasks::new();
        let value = subtasks.measure_subtask("sum", || (1..=10).sum::<u32>());
        assert_eq!(value, 55);

        subtasks.measure_subtask("unit", || ());
        assert_eq!(subtasks.names(), ["sum", "unit"]);
    }

    #[test]
    fn test_repeated_name_accumulates() {
        let mut subtasks = Subtasks::new();
        subtasks.measure_subtask("parse", || std::thread::sleep(Duration::from_millis(2)));
        let first = subtasks.elapsed("parse");
        subtasks.measure_subtask("parse", || std::thread::sleep(Duration::from_millis(2)));

        assert!(subtasks.elapsed("parse") >= first + Duration::from_millis(2));
        assert_eq!(subtasks.names(), ["parse", "parse"]);
        assert_eq!(subtasks.columns(), ["parse"]);
    }

    #[test]
    fn test_columns_keep_first_order() {
        let mut subtasks = Subtasks::new();
        for name in ["b", "a", "b", "c", "a"] {
            subtasks.measure_subtask(name, || ());
        }
        assert_eq!(subtasks.columns(), ["b", "a", "c"]);
    }

    #[test]
    fn test_execution_clears_names_only() {
        let mut subtasks = Subtasks::new();
        subtasks.measure_subtask("x", || std::thread::sleep(Duration::from_millis(1)));
        subtasks.begin_execution();

        assert!(subtasks.names().is_empty());
        assert_eq!(subtasks.columns(), ["x"]);
        assert!(subtasks.elapsed("x") >= Duration::from_millis(1));

        subtasks.begin_attempt();
        assert!(subtasks.columns().is_empty());
        assert_eq!(subtasks.elapsed("x"), Duration::ZERO);
    }

    #[test]
    fn test_columns_span_executions() {
        let mut subtasks = Subtasks::new();
        subtasks.begin_execution();
        subtasks.measure_subtask("setup", || ());
        subtasks.measure_subtask("query", || ());
        subtasks.begin_execution();
        subtasks.measure_subtask("query", || ());
        subtasks.measure_subtask("cleanup", || ());

        assert_eq!(subtasks.names(), ["query", "cleanup"]);
        assert_eq!(subtasks.columns(), ["setup", "query", "cleanup"]);
    }

    #[test]
    fn test_error_results_pass_through() {
        let mut subtasks = Subtasks::new();
        let result: Result<u8, String> =
            subtasks.measure_subtask("decode", || Err("truncated".to_string()));
        assert_eq!(result, Err("truncated".to_string()));
        assert_eq!(subtasks.names(), ["decode"]);
    }
}
