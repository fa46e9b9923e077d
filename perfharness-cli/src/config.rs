//! Configuration loading from perfharness.toml
//!
//! Configuration can be specified in a `perfharness.toml` file in the project
//! root. The file is discovered by walking up from the current directory.

use anyhow::Context;
use perfharness_core::HarnessConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE_NAME: &str = "perfharness.toml";

/// perfharness configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PerfConfig {
    /// Iteration counts and table layout
    #[serde(default)]
    pub harness: HarnessConfig,
    /// Timing log configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Timing log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File receiving subtask timings (no log when unset)
    #[serde(default)]
    pub log: Option<PathBuf>,
    /// Append to an existing log instead of overwriting it
    #[serde(default = "default_append")]
    pub append: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log: None,
            append: default_append(),
        }
    }
}

fn default_append() -> bool {
    true
}

impl PerfConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        config
            .harness
            .validate()
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        Ok(config)
    }

    /// Discover and load configuration by walking up from the current directory
    pub fn discover() -> anyhow::Result<Option<Self>> {
        let dir = std::env::current_dir()?;
        match find_config_file(&dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::load(&path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# perfharness configuration

[harness]
# Timed attempts per measurement (relative stddev is computed over these)
measurement_count = 10
# Workload executions batched into each attempt
run_count = 100
# Elements workloads put into repeated test data
repeated_count = 10
# Console header layout: "staggered" (two rows) or "single"
header = "staggered"

[output]
# Subtask timing log for the visualization page (uncomment to enable)
# log = "target/perfharness/results.log"
# Append to an existing log instead of overwriting it
append = true
"#
        .to_string()
    }
}

/// Find `perfharness.toml` in `start` or any of its ancestors
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }
        if !dir.pop() {
            return None;
        }
    }
}
