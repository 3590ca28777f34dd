//! Configuration for the `logsift` binary.
//!
//! Lives outside `logsift-core`, which never reads configuration files or the
//! environment.
//!
//! [`Config::load`] layers `~/.config/logsift/config.toml` (when present) over
//! the built-in defaults. [`Config::defaults`] returns the same defaults
//! without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use logsift_core::ExportFormat;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[display]
entry_limit = 100
top_sources = 10

[export]
default_format = "json"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level front-end configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[display]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Maximum entries listed after the statistics report.
    #[serde(default = "default_entry_limit")]
    pub entry_limit: usize,
    /// Number of sources listed under "Top Sources".
    #[serde(default = "default_top_sources")]
    pub top_sources: usize,
}

fn default_entry_limit() -> usize { 100 }
fn default_top_sources() -> usize { 10 }

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            entry_limit: default_entry_limit(),
            top_sources: default_top_sources(),
        }
    }
}

/// `[export]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_format")]
    pub default_format: String,
}

fn default_export_format() -> String { "json".to_string() }

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: default_export_format(),
        }
    }
}

impl ExportConfig {
    /// The configured format, falling back to JSON when the value is not
    /// one of `json`, `csv` or `txt`.
    pub fn format(&self) -> ExportFormat {
        self.default_format.parse().unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/logsift/config.toml`, layered on top of the
    /// built-in defaults. A missing file is not an error.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(&config_path())
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .and_then(|built| built.try_deserialize())
            .unwrap_or_else(|_| Self {
                display: DisplayConfig::default(),
                export: ExportConfig::default(),
            })
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("logsift")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
