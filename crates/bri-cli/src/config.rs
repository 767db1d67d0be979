//! Configuration management for the CLI.
//!
//! Settings come from a TOML file: the path given with `--config`, or
//! `~/.bri/config.toml` when that exists. Command-line flags override file
//! values.
//!
//! ```toml
//! [tags]
//! primary = "tags/1965-1985.tsv"
//! fixes = "tags/OCR_corrections_1965.tsv"
//!
//! [extractor]
//! chunk_size = 10000
//!
//! [oracle]
//! endpoint = "http://localhost:8500"
//! timeout_secs = 30
//!
//! [settings]
//! format = "table"
//! ```

use crate::error::{CliError, Result};
use bri_extractor::ExtractorConfig;
use bri_oracle::HttpOracle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tag source files
    #[serde(default)]
    pub tags: TagSources,

    /// Chunked extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Tagging service settings
    #[serde(default)]
    pub oracle: OracleSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Paths of the two tag sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagSources {
    /// Primary tag to title mapping
    pub primary: Option<PathBuf>,

    /// OCR-fix supplement
    pub fixes: Option<PathBuf>,
}

/// Tagging service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSettings {
    /// Service base URL; no oracle when unset
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Unresolved tags listed in the diagnostics report
    #[serde(default = "default_top_unresolved")]
    pub top_unresolved: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".bri").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// if present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::path() {
                Ok(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(&path)
            .map_err(|e| CliError::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;
        if self.oracle.timeout_secs == 0 {
            return Err(CliError::Config("oracle.timeout_secs must be greater than 0".into()));
        }
        Ok(())
    }

    /// Build the HTTP oracle, preferring `url` over the configured endpoint.
    ///
    /// Returns `None` when no endpoint is known.
    pub fn oracle(&self, url: Option<&str>) -> Result<Option<HttpOracle>> {
        let endpoint = match url.or(self.oracle.endpoint.as_deref()) {
            Some(endpoint) => endpoint,
            None => return Ok(None),
        };
        let timeout = Duration::from_secs(self.oracle.timeout_secs);
        Ok(Some(HttpOracle::with_timeout(endpoint, timeout)?))
    }

    /// Tag source path: `flag` if given, the configured path otherwise.
    pub fn tag_source(flag: Option<PathBuf>, configured: &Option<PathBuf>, name: &str) -> Result<PathBuf> {
        flag.or_else(|| configured.clone()).ok_or_else(|| {
            CliError::Config(format!(
                "No {} tag source; pass --{} or set tags.{} in the config file",
                name, name, name
            ))
        })
    }
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            top_unresolved: default_top_unresolved(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    bri_oracle::http::DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_top_unresolved() -> usize {
    20
}
