//! perfharness Example Suites
//!
//! Serialization round trips timed per step, the way a message library
//! benchmarks its generated types.
//!
//! Run with:
//!   cargo run --example message_suite                          # Run all suites
//!   cargo run --example message_suite -- list                  # List suites
//!   cargo run --example message_suite -- -m 5 -r 1000 scalars  # Fewer attempts, more runs
//!   cargo run --example message_suite -- --log results.log     # Write the visualization log

use perfharness::prelude::*;
use serde::{Deserialize, Serialize};
use std::hint::black_box;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Scalars {
    id: u64,
    ratio: f64,
    name: String,
    enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct Repeated {
    ids: Vec<u64>,
    names: Vec<String>,
    children: Vec<Scalars>,
}

fn populate_scalars(seed: u64) -> Scalars {
    Scalars {
        id: seed,
        ratio: seed as f64 / 3.0,
        name: format!("message-{}", seed),
        enabled: seed % 2 == 0,
    }
}

fn populate_repeated(count: usize) -> Repeated {
    let mut message = Repeated::default();
    for i in 0..count as u64 {
        message.ids.push(i);
        message.names.push(format!("name-{}", i));
        message.children.push(populate_scalars(i));
    }
    message
}

// ============================================================================
// Scalar fields
// ============================================================================

fn run_scalars(harness: &mut Harness<LogSink>) -> Result<(), HarnessError> {
    harness.try_measure(|s| -> Result<(), HarnessError> {
        let message = s.measure_subtask("Populate", || populate_scalars(black_box(42)));
        let bytes = s
            .measure_subtask("Encode", || serde_json::to_vec(&message))
            .map_err(HarnessError::workload)?;
        let decoded: Scalars = s
            .measure_subtask("Decode", || serde_json::from_slice(&bytes))
            .map_err(HarnessError::workload)?;
        s.measure_subtask("Equality", || black_box(decoded == message));
        Ok(())
    })?;
    Ok(())
}

register_suite!(
    "scalars",
    run_scalars,
    description = "encode/decode a message of scalar fields",
    tags = ["json"]
);

// ============================================================================
// Repeated fields
// ============================================================================

fn run_repeated(harness: &mut Harness<LogSink>) -> Result<(), HarnessError> {
    let count = harness.repeated_count();

    harness.try_measure(|s| -> Result<(), HarnessError> {
        let message = s.measure_subtask("Populate", || populate_repeated(count));
        let bytes = s
            .measure_subtask("Encode", || serde_json::to_vec(&message))
            .map_err(HarnessError::workload)?;
        let decoded: Repeated = s
            .measure_subtask("Decode", || serde_json::from_slice(&bytes))
            .map_err(HarnessError::workload)?;
        s.measure_subtask("Equality", || black_box(decoded == message));
        Ok(())
    })?;

    // Second measurement: pretty output, subtask registered twice per run
    let message = populate_repeated(count);
    harness.try_measure(|s| -> Result<(), HarnessError> {
        for _ in 0..2 {
            let text = s
                .measure_subtask("Encode pretty", || serde_json::to_string_pretty(&message))
                .map_err(HarnessError::workload)?;
            black_box(text);
        }
        Ok(())
    })?;
    Ok(())
}

register_suite!(
    "repeated",
    run_repeated,
    description = "repeated fields sized by --repeated-count",
    tags = ["json", "repeated"]
);

fn main() -> anyhow::Result<()> {
    perfharness::run()
}
