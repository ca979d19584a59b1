//! `desyde.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use desyde_flatten::PortPolicy;
use serde::{Deserialize, Serialize};

/// File name of the project manifest.
pub const MANIFEST_FILE: &str = "desyde.toml";

/// Model file created by `desyde init` and read by default.
pub const DEFAULT_INPUT: &str = "model/main.json";

/// Flattened model written by default.
pub const DEFAULT_OUTPUT: &str = "out/flat.json";

/// The top-level manifest structure for a DeSyDe project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesydeManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Flattening configuration.
    #[serde(default)]
    pub flatten: Option<FlattenSection>,
    /// Logging configuration.
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Flattening section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlattenSection {
    /// `strict` or `lenient`.
    #[serde(default)]
    pub port_policy: Option<PortPolicy>,
    /// Model file, relative to the project directory.
    #[serde(default)]
    pub default_input: Option<String>,
    /// Output file, relative to the project directory.
    #[serde(default)]
    pub default_output: Option<String>,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `debug` or
    /// `desyde_flatten=trace`.
    #[serde(default)]
    pub level: Option<String>,
}

impl DesydeManifest {
    /// Search upward from `start_dir` for a `desyde.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: DesydeManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing desyde.toml")
    }

    pub fn port_policy(&self) -> Option<PortPolicy> {
        self.flatten.as_ref().and_then(|f| f.port_policy)
    }

    pub fn default_input(&self) -> Option<&str> {
        self.flatten
            .as_ref()
            .and_then(|f| f.default_input.as_deref())
    }

    pub fn default_output(&self) -> Option<&str> {
        self.flatten
            .as_ref()
            .and_then(|f| f.default_output.as_deref())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    /// Generate the default template for `desyde init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
version = "0.1.0"

[flatten]
port_policy = "strict"
default_input = "{DEFAULT_INPUT}"
default_output = "{DEFAULT_OUTPUT}"

[logging]
level = "info"
"#
        )
    }
}
