#![warn(missing_docs)]
//! perfharness CLI Library
//!
//! Command-line driver for benchmark binaries. Register suites with
//! `perfharness::register_suite!` and call `perfharness::run()` (or
//! `perfharness_cli::run()`) from `main` to run every registered suite
//! against one shared harness.
//!
//! # Example
//!
//! ```ignore
//! use perfharness::prelude::*;
//!
//! fn run_sums(harness: &mut Harness<LogSink>) -> Result<(), HarnessError> {
//!     let data: Vec<u64> = (0..harness.repeated_count() as u64).collect();
//!     harness.measure(|s| {
//!         s.measure_subtask("Sum", || data.iter().sum::<u64>());
//!     })?;
//!     Ok(())
//! }
//!
//! register_suite!("sums", run_sums);
//!
//! fn main() -> anyhow::Result<()> {
//!     perfharness_cli::run()
//! }
//! ```

mod config;
mod planner;

pub use config::*;
pub use planner::{RunPlan, build_plan};

use anyhow::Context;
use clap::{Parser, Subcommand};
use perfharness_core::{
    Harness, HarnessConfig, HeaderLayout, LogSink, SuiteDef, registered_suites,
};
use regex::Regex;
use std::fs::OpenOptions;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// perfharness CLI arguments
#[derive(Parser, Debug)]
#[command(name = "perfharness")]
#[command(author, version, about = "perfharness - micro-benchmark timing harness")]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter suites by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Only run suites with this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Skip suites with this tag
    #[arg(long)]
    pub skip_tag: Option<String>,

    /// Timed attempts per measurement
    #[arg(long, short = 'm')]
    pub measurement_count: Option<usize>,

    /// Workload executions per attempt
    #[arg(long, short = 'r')]
    pub run_count: Option<usize>,

    /// Elements in repeated test data
    #[arg(long)]
    pub repeated_count: Option<usize>,

    /// Console header layout: staggered or single
    #[arg(long)]
    pub header: Option<HeaderLayout>,

    /// Timing log file for the visualization page
    #[arg(short, long)]
    pub log: Option<PathBuf>,

    /// Overwrite the timing log instead of appending to it
    #[arg(long)]
    pub truncate: bool,

    /// Dry run - list suites without executing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all registered suites
    List,
    /// Run suites (default)
    Run,
}

/// Run the perfharness CLI with the process arguments.
/// This is the main entry point for benchmark binaries.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the perfharness CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    // Diagnostics go to stderr so the table on stdout stays readable
    let filter = if cli.verbose {
        "perfharness=debug"
    } else {
        "perfharness=info"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    // Discover perfharness.toml configuration (CLI flags override)
    let config = PerfConfig::discover()?.unwrap_or_default();

    if lists_only(&cli) {
        list_suites(&cli)
    } else {
        run_suites(&cli, &config)
    }
}

/// Whether the invocation only lists suites (`list`, or `--dry-run` with or
/// without `run`)
fn lists_only(cli: &Cli) -> bool {
    cli.dry_run || matches!(cli.command, Some(Commands::List))
}

/// Layer CLI overrides on top of the configuration file.
pub fn resolve_harness_config(cli: &Cli, config: &PerfConfig) -> anyhow::Result<HarnessConfig> {
    let file = config.harness;
    let resolved = HarnessConfig {
        measurement_count: cli.measurement_count.unwrap_or(file.measurement_count),
        run_count: cli.run_count.unwrap_or(file.run_count),
        repeated_count: cli.repeated_count.unwrap_or(file.repeated_count),
        header: cli.header.unwrap_or(file.header),
    };
    resolved.validate()?;
    Ok(resolved)
}

/// Open the timing log sink.
///
/// Without a path every record is discarded. Parent directories are created
/// as needed.
pub fn open_log(path: Option<&Path>, append: bool) -> anyhow::Result<LogSink> {
    let Some(path) = path else {
        return Ok(Box::new(io::sink()));
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .with_context(|| format!("failed to open timing log {}", path.display()))?;

    Ok(Box::new(BufWriter::new(file)))
}

/// Select suites according to the CLI filters.
fn filter_suites(
    cli: &Cli,
    suites: &[&'static SuiteDef],
) -> anyhow::Result<Vec<&'static SuiteDef>> {
    let filter_re = Regex::new(&cli.filter)
        .with_context(|| format!("invalid filter pattern '{}'", cli.filter))?;

    let plan = build_plan(
        suites.iter().copied(),
        Some(&filter_re),
        cli.tag.as_deref(),
        cli.skip_tag.as_deref(),
    );

    Ok(plan.suites)
}

fn list_suites(cli: &Cli) -> anyhow::Result<()> {
    println!("perfharness plan:");

    let suites = filter_suites(cli, &registered_suites())?;
    for suite in &suites {
        let tags = if suite.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", suite.tags.join(", "))
        };
        if suite.description.is_empty() {
            println!("├── {}{}", suite.id, tags);
        } else {
            println!("├── {}{} - {}", suite.id, tags, suite.description);
        }
    }

    println!("{} suites found.", suites.len());
    Ok(())
}

fn run_suites(cli: &Cli, config: &PerfConfig) -> anyhow::Result<()> {
    let suites = filter_suites(cli, &registered_suites())?;
    if suites.is_empty() {
        println!("No suites found.");
        return Ok(());
    }

    let harness_config = resolve_harness_config(cli, config)?;
    let log_path = cli.log.as_deref().or(config.output.log.as_deref());
    let append = config.output.append && !cli.truncate;
    let log = open_log(log_path, append)?;

    if let Some(path) = log_path {
        tracing::info!(path = %path.display(), append, "writing timing log");
    }

    let mut harness = Harness::with_config(log, harness_config);
    let start_time = Instant::now();

    for suite in &suites {
        println!("\n== {} ==", suite.id);
        tracing::info!(suite = suite.id, "running suite");

        let suite_start = Instant::now();
        (suite.run_fn)(&mut harness)
            .with_context(|| format!("suite '{}' failed", suite.id))?;

        tracing::info!(
            suite = suite.id,
            elapsed_ms = suite_start.elapsed().as_secs_f64() * 1000.0,
            "suite finished"
        );
    }

    tracing::info!(
        suites = suites.len(),
        elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0,
        "all suites finished"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["perfharness"]).unwrap();
        assert_eq!(cli.filter, ".*");
        assert!(cli.command.is_none());
        assert!(cli.log.is_none());
        assert!(!cli.truncate);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "perfharness",
            "json",
            "-m",
            "3",
            "--run-count",
            "50",
            "--header",
            "single",
            "--log",
            "out.log",
        ])
        .unwrap();

        assert_eq!(cli.filter, "json");
        assert_eq!(cli.measurement_count, Some(3));
        assert_eq!(cli.run_count, Some(50));
        assert_eq!(cli.header, Some(HeaderLayout::Single));
        assert_eq!(cli.log, Some(PathBuf::from("out.log")));
    }

    #[test]
    fn test_parse_list_subcommand() {
        let cli = Cli::try_parse_from(["perfharness", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_dry_run_lists_only() {
        let run = Cli::try_parse_from(["perfharness", "run"]).unwrap();
        assert!(!lists_only(&run));

        let dry_run = Cli::try_parse_from(["perfharness", "run", "--dry-run"]).unwrap();
        assert!(matches!(dry_run.command, Some(Commands::Run)));
        assert!(lists_only(&dry_run));

        let dry_default = Cli::try_parse_from(["perfharness", "--dry-run"]).unwrap();
        assert!(lists_only(&dry_default));
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let cli = Cli::try_parse_from(["perfharness", "-r", "7"]).unwrap();
        let mut config = PerfConfig::default();
        config.harness.measurement_count = 4;
        config.harness.run_count = 40;

        let resolved = resolve_harness_config(&cli, &config).unwrap();
        assert_eq!(resolved.measurement_count, 4);
        assert_eq!(resolved.run_count, 7);
        assert_eq!(resolved.repeated_count, 10);
    }

    #[test]
    fn test_zero_override_is_rejected() {
        let cli = Cli::try_parse_from(["perfharness", "--measurement-count", "0"]).unwrap();
        assert!(resolve_harness_config(&cli, &PerfConfig::default()).is_err());
    }

    #[test]
    fn test_open_log_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("results.log");

        for line in ["first\n", "second\n"] {
            let mut log = open_log(Some(path.as_path()), true).unwrap();
            log.write_all(line.as_bytes()).unwrap();
            log.flush().unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");

        let mut log = open_log(Some(path.as_path()), false).unwrap();
        log.write_all(b"third\n").unwrap();
        log.flush().unwrap();
        drop(log);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "third\n");
    }

    #[test]
    fn test_open_log_without_path_discards() {
        let mut log = open_log(None, true).unwrap();
        log.write_all(b"ignored").unwrap();
    }

    #[test]
    fn test_invalid_filter_is_an_error() {
        let cli = Cli::try_parse_from(["perfharness", "("]).unwrap();
        assert!(filter_suites(&cli, &[]).is_err());
    }
}
