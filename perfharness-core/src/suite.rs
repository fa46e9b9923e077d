//! Suite registry
//!
//! A suite is the driver code that decides what to benchmark: its `run_fn`
//! builds test data, then calls [`Harness::measure`] once per workload.
//! Suites register themselves at link time through `inventory` and are
//! discovered by the CLI.

use crate::error::HarnessError;
use crate::harness::{Harness, LogSink};

/// Signature of a suite's entry point
pub type SuiteFn = fn(&mut Harness<LogSink>) -> Result<(), HarnessError>;

/// Suite definition registered via `register_suite!`
#[derive(Debug, Clone)]
pub struct SuiteDef {
    /// Unique identifier, used for filtering
    pub id: &'static str,
    /// One-line description shown by `list`
    pub description: &'static str,
    /// Tags for filtering
    pub tags: &'static [&'static str],
    /// Entry point
    pub run_fn: SuiteFn,
}

impl SuiteDef {
    /// Whether the suite carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

inventory::collect!(SuiteDef);

/// All registered suites, sorted by id
pub fn registered_suites() -> Vec<&'static SuiteDef> {
    let mut suites: Vec<_> = inventory::iter::<SuiteDef>.into_iter().collect();
    suites.sort_by_key(|s| s.id);
    suites
}

/// Anchor to prevent LTO from stripping inventory entries
#[used]
#[doc(hidden)]
pub static REGISTRY_ANCHOR: fn() = || {
    for _ in inventory::iter::<SuiteDef> {}
};
