//! Harness - The Measurement Loop
//!
//! A measurement repeats the workload `run_count` times per attempt, for
//! `measurement_count` attempts:
//! - Each attempt is timed as a whole (total time, used for the stddev)
//! - Subtasks registered by the workload are timed separately and printed
//!   per attempt as mean-per-run microseconds
//! - After the last attempt, every subtask's history is flushed to the
//!   timing log and the relative stddev of the attempts is printed

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::measure::Timer;
use crate::subtask::Subtasks;
use perfharness_report::{ProgressTable, TimingLog};
use perfharness_stats::{Statistics, compute_statistics, duration_micros};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::Duration;

/// Sink type used by registered suites
pub type LogSink = Box<dyn Write>;

/// Result of one [`Harness::measure`] call
#[derive(Debug, Clone)]
pub struct Measurement {
    /// Total duration of each attempt
    pub attempts: Vec<Duration>,
    /// Raw accumulated duration per attempt (microseconds), keyed by subtask
    pub subtask_timings: BTreeMap<String, Vec<f64>>,
    /// Statistics of the attempt durations
    pub statistics: Statistics,
    /// Workload executions per attempt
    pub run_count: usize,
}

impl Measurement {
    /// Relative standard deviation of the attempts, in percent
    pub fn relative_stddev(&self) -> f64 {
        self.statistics.relative_stddev()
    }

    /// Mean-per-run timings (microseconds) of a subtask, one per attempt
    pub fn mean_per_run(&self, name: &str) -> Option<Vec<f64>> {
        let run_count = self.run_count as f64;
        self.subtask_timings
            .get(name)
            .map(|timings| timings.iter().map(|micros| micros / run_count).collect())
    }
}

/// Times workloads and reports per-subtask results.
///
/// The log sink receives the raw subtask timings; the console (stdout unless
/// built with [`Harness::with_console`]) receives the progress table.
pub struct Harness<L: Write, C: Write = io::Stdout> {
    config: HarnessConfig,
    log: TimingLog<L>,
    console: C,
    subtasks: Subtasks,
    subtask_timings: BTreeMap<String, Vec<f64>>,
}

impl<L: Write> Harness<L> {
    /// Create a harness with default counts writing its table to stdout
    pub fn new(log: L) -> Self {
        Self::with_config(log, HarnessConfig::default())
    }

    /// Create a harness with the given counts writing its table to stdout
    pub fn with_config(log: L, config: HarnessConfig) -> Self {
        Harness::with_console(log, io::stdout(), config)
    }
}

impl<L: Write, C: Write> Harness<L, C> {
    /// Create a harness writing its table to `console`
    pub fn with_console(log: L, console: C, config: HarnessConfig) -> Self {
        Self {
            config: config.clamped(),
            log: TimingLog::new(log),
            console,
            subtasks: Subtasks::new(),
            subtask_timings: BTreeMap::new(),
        }
    }

    /// Workload executions per attempt
    pub fn run_count(&self) -> usize {
        self.config.run_count
    }

    /// Attempts per measurement
    pub fn measurement_count(&self) -> usize {
        self.config.measurement_count
    }

    /// Size of repeated test data workloads should build
    pub fn repeated_count(&self) -> usize {
        self.config.repeated_count
    }

    /// Active configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Subtask histories of the latest measurement
    pub fn subtask_timings(&self) -> &BTreeMap<String, Vec<f64>> {
        &self.subtask_timings
    }

    /// Borrow the console writer
    pub fn console(&self) -> &C {
        &self.console
    }

    /// Borrow the log sink
    pub fn log(&self) -> &L {
        self.log.get_ref()
    }

    /// Recover the log sink and console writer
    pub fn into_parts(self) -> (L, C) {
        (self.log.into_inner(), self.console)
    }

    /// Measure an infallible workload
    pub fn measure<F>(&mut self, mut workload: F) -> Result<Measurement, HarnessError>
    where
        F: FnMut(&mut Subtasks),
    {
        self.try_measure(|subtasks| {
            workload(subtasks);
            Ok::<(), HarnessError>(())
        })
    }

    /// Measure a fallible workload.
    ///
    /// The first error returned by the workload ends the measurement and is
    /// returned as is; nothing is written to the log in that case.
    pub fn try_measure<E, F>(&mut self, mut workload: F) -> Result<Measurement, E>
    where
        F: FnMut(&mut Subtasks) -> Result<(), E>,
        E: From<HarnessError>,
    {
        let run_count = self.config.run_count;
        let mut attempts = Vec::with_capacity(self.config.measurement_count);
        let mut table = ProgressTable::new(self.config.header);
        // Column order of the table, fixed by the first attempt
        let mut columns: Vec<String> = Vec::new();

        self.subtask_timings.clear();
        table
            .write_preamble(&mut self.console, run_count)
            .map_err(HarnessError::from)?;

        // Repeat the whole batch to expose noise between attempts
        for attempt in 1..=self.config.measurement_count {
            self.subtasks.begin_attempt();

            let timer = Timer::start();
            for _ in 0..run_count {
                self.subtasks.begin_execution();
                workload(&mut self.subtasks)?;
            }
            let elapsed = timer.stop();
            attempts.push(elapsed);

            tracing::debug!(
                attempt,
                elapsed_us = duration_micros(elapsed),
                subtasks = self.subtasks.columns().len(),
                "attempt finished"
            );

            self.record_attempt(&mut table, &mut columns, attempt)?;
        }

        Ok(self.finish(&table, attempts)?)
    }

    fn record_attempt(
        &mut self,
        table: &mut ProgressTable,
        columns: &mut Vec<String>,
        attempt: usize,
    ) -> Result<(), HarnessError> {
        // Names first seen in a later attempt go after the existing columns
        for name in self.subtasks.columns() {
            if !columns.contains(name) {
                columns.push(name.clone());
            }
        }
        table.write_header(&mut self.console, &columns[..])?;

        let run_count = self.config.run_count as f64;
        let mut per_run = Vec::with_capacity(columns.len());
        for name in columns.iter() {
            let micros = duration_micros(self.subtasks.elapsed(name));
            per_run.push(micros / run_count);
            self.subtask_timings
                .entry(name.clone())
                .or_default()
                .push(micros);
        }

        table.write_row(&mut self.console, attempt, &per_run)?;
        Ok(())
    }

    fn finish(
        &mut self,
        table: &ProgressTable,
        attempts: Vec<Duration>,
    ) -> Result<Measurement, HarnessError> {
        for (name, timings) in &self.subtask_timings {
            self.log.write_timings(name, timings)?;
        }
        self.log.flush()?;

        let statistics = compute_statistics(&attempts)?;
        table.write_footer(&mut self.console, statistics.relative_stddev())?;
        self.console.flush()?;

        tracing::info!(
            attempts = attempts.len(),
            mean_us = statistics.mean,
            relative_stddev = statistics.relative_stddev(),
            log_records = self.log.records_written(),
            "measurement complete"
        );

        Ok(Measurement {
            attempts,
            subtask_timings: self.subtask_timings.clone(),
            statistics,
            run_count: self.config.run_count,
        })
    }
}
