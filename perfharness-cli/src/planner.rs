//! Suite Planner
//!
//! Builds the run plan by filtering registered suites.
//!
//! Filtering options:
//! - Regex pattern matching on suite ID
//! - Tag inclusion/exclusion
//!
//! Ordering: Suites are sorted alphabetically by ID for deterministic execution.

use perfharness_core::SuiteDef;
use regex::Regex;

/// Suites selected for a run
pub struct RunPlan {
    /// Ordered list of suites to run
    pub suites: Vec<&'static SuiteDef>,
}

/// Build the run plan from discovered suites
pub fn build_plan(
    suites: impl IntoIterator<Item = &'static SuiteDef>,
    filter: Option<&Regex>,
    tag: Option<&str>,
    skip_tag: Option<&str>,
) -> RunPlan {
    let mut selected: Vec<_> = suites
        .into_iter()
        .filter(|s| filter.is_none_or(|re| re.is_match(s.id)))
        .filter(|s| tag.is_none_or(|t| s.has_tag(t)))
        .filter(|s| skip_tag.is_none_or(|t| !s.has_tag(t)))
        .collect();

    selected.sort_by_key(|s| s.id);

    RunPlan { suites: selected }
}
