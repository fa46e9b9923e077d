//! Timing Log
//!
//! Line-oriented record of every subtask's attempt timings, consumed by the
//! visualization page. Each record looks like
//!
//! ```text
//! "Encode": [1203.5, 1198.25, 1201],
//! ```
//!
//! The page embeds the lines inside an object literal, so each record is a
//! JSON member: a quoted, escaped name and an array of microsecond values.

use std::io::{self, Write};

/// Format one log record, including the trailing comma and newline
pub fn format_log_record(name: &str, timings: &[f64]) -> io::Result<String> {
    let mut buf = Vec::new();
    write_record(&mut buf, name, timings)?;
    String::from_utf8(buf).map_err(io::Error::other)
}

fn write_record<W: Write>(out: &mut W, name: &str, timings: &[f64]) -> io::Result<()> {
    serde_json::to_writer(&mut *out, name)?;
    out.write_all(b": [")?;
    for (i, micros) in timings.iter().enumerate() {
        if i > 0 {
            out.write_all(b", ")?;
        }
        write!(out, "{}", micros)?;
    }
    out.write_all(b"],\n")
}

/// Appends subtask timing records to a sink
#[derive(Debug)]
pub struct TimingLog<W: Write> {
    sink: W,
    records: usize,
}

impl<W: Write> TimingLog<W> {
    /// Wrap a writable sink
    pub fn new(sink: W) -> Self {
        Self { sink, records: 0 }
    }

    /// Append the timings (microseconds, one per attempt) recorded for `name`
    pub fn write_timings(&mut self, name: &str, timings: &[f64]) -> io::Result<()> {
        write_record(&mut self.sink, name, timings)?;
        self.records += 1;
        Ok(())
    }

    /// Flush buffered records to the underlying sink
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records
    }

    /// Borrow the underlying sink
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Recover the underlying sink
    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn parse_record(line: &str) -> BTreeMap<String, Vec<f64>> {
        let member = line.trim_end().trim_end_matches(',');
        serde_json::from_str(&format!("{{{}}}", member)).unwrap()
    }

    #[test]
    fn test_record_format() {
        let line = format_log_record("parse", &[10.5, 11.0, 9.25]).unwrap();
        assert_eq!(line, "\"parse\": [10.5, 11, 9.25],\n");
    }

    #[test]
    fn test_record_is_json_member() {
        let line = format_log_record("decode \"fast\"", &[1.5, 2.0]).unwrap();
        let parsed = parse_record(&line);
        assert_eq!(parsed["decode \"fast\""], vec![1.5, 2.0]);
    }

    #[test]
    fn test_empty_timings() {
        let line = format_log_record("idle", &[]).unwrap();
        assert_eq!(line, "\"idle\": [],\n");
    }

    #[test]
    fn test_log_appends_records() {
        let mut log = TimingLog::new(Vec::new());
        log.write_timings("a", &[1.0]).unwrap();
        log.write_timings("b", &[2.0, 3.0]).unwrap();
        log.flush().unwrap();

        assert_eq!(log.records_written(), 2);
        let text = String::from_utf8(log.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["\"a\": [1],", "\"b\": [2, 3],"]);
        assert_eq!(parse_record(lines[1])["b"], vec![2.0, 3.0]);
    }

    #[test]
    fn test_sink_discards() {
        let mut log = TimingLog::new(io::sink());
        log.write_timings("a", &[1.0]).unwrap();
        assert_eq!(log.records_written(), 1);
    }
}
