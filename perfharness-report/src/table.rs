//! Progress Table
//!
//! Console output written while a measurement runs:
//!
//! ```text
//! Running each check 100 times, times in µs
//!    Populate          Decode
//!             Encode            Equality
//!   1    1.250    3.400   12.117    0.802
//!   2    1.249    3.398   12.090    0.799
//! Relative stddev = 0.4%
//! ```
//!
//! The default header staggers subtask names across two rows so that long
//! names fit above the 9-character value columns. [`HeaderLayout::Single`]
//! puts every name on one row and widens columns to fit instead.

use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Width of a value column in the attempt rows
pub const COLUMN_WIDTH: usize = 9;

/// Width of the attempt-number gutter
const GUTTER_WIDTH: usize = 3;

/// Width of a name slot in the staggered header (two value columns)
const STAGGERED_SLOT_WIDTH: usize = 2 * COLUMN_WIDTH;

/// How subtask names are laid out above the value columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderLayout {
    /// Even-indexed names on the first row, odd-indexed names on the second
    #[default]
    Staggered,
    /// All names on a single row
    Single,
}

impl std::str::FromStr for HeaderLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "staggered" | "two-row" => Ok(HeaderLayout::Staggered),
            "single" | "one-row" => Ok(HeaderLayout::Single),
            other => Err(format!("Unknown header layout: {}", other)),
        }
    }
}

/// Writes the per-attempt progress table of one measurement
#[derive(Debug, Clone)]
pub struct ProgressTable {
    layout: HeaderLayout,
    widths: Vec<usize>,
    header_written: bool,
}

impl ProgressTable {
    /// Create a table that has not written its header yet
    pub fn new(layout: HeaderLayout) -> Self {
        Self {
            layout,
            widths: Vec::new(),
            header_written: false,
        }
    }

    /// Write the line announcing how often each check runs
    pub fn write_preamble<W: Write>(&self, out: &mut W, run_count: usize) -> io::Result<()> {
        writeln!(out, "Running each check {} times, times in µs", run_count)
    }

    /// Write the column header. Only the first call has any effect.
    pub fn write_header<W: Write, S: AsRef<str>>(
        &mut self,
        out: &mut W,
        names: &[S],
    ) -> io::Result<()> {
        if self.header_written {
            return Ok(());
        }
        self.header_written = true;

        match self.layout {
            HeaderLayout::Staggered => {
                self.widths = vec![COLUMN_WIDTH; names.len()];

                write!(out, "{:w$}", "", w = GUTTER_WIDTH)?;
                for name in names.iter().step_by(2) {
                    write!(out, "{:<w$}", name.as_ref(), w = STAGGERED_SLOT_WIDTH)?;
                }
                writeln!(out)?;

                write!(out, "{:w$}", "", w = GUTTER_WIDTH + COLUMN_WIDTH)?;
                for name in names.iter().skip(1).step_by(2) {
                    write!(out, "{:<w$}", name.as_ref(), w = STAGGERED_SLOT_WIDTH)?;
                }
                writeln!(out)
            }
            HeaderLayout::Single => {
                self.widths = names
                    .iter()
                    .map(|n| (n.as_ref().chars().count() + 1).max(COLUMN_WIDTH))
                    .collect();

                write!(out, "{:w$}", "", w = GUTTER_WIDTH)?;
                for (name, width) in names.iter().zip(&self.widths) {
                    write!(out, "{:>w$}", name.as_ref(), w = *width)?;
                }
                writeln!(out)
            }
        }
    }

    /// Write one attempt row of mean-per-run timings (microseconds)
    pub fn write_row<W: Write>(
        &self,
        out: &mut W,
        attempt: usize,
        per_run_micros: &[f64],
    ) -> io::Result<()> {
        write!(out, "{:>w$}", attempt, w = GUTTER_WIDTH)?;
        for (i, value) in per_run_micros.iter().enumerate() {
            let width = self.widths.get(i).copied().unwrap_or(COLUMN_WIDTH);
            write!(out, "{:>w$.3}", value, w = width)?;
        }
        writeln!(out)
    }

    /// Write the closing noise summary
    pub fn write_footer<W: Write>(&self, out: &mut W, relative_stddev: f64) -> io::Result<()> {
        writeln!(out, "Relative stddev = {:.1}%", relative_stddev)
    }
}
