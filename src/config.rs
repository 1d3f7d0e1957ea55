//! Configuration for the compatibility checker
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (compat.toml)
//! - Environment variables (COMPAT__*)
//!
//! ## Example config file (compat.toml):
//! ```toml
//! [policy]
//! mode = "full-transitive"
//! fail_on_incompatible = true
//!
//! [output]
//! format = "json"
//! pretty = true
//!
//! [history]
//! dir = "schemas/history"
//! extension = "avsc"
//! ```

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::error::Result;
use crate::mode::Mode;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompatConfig {
    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

/// Which policy to apply and how to react to a failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Compatibility mode, by name or registry alias
    #[serde(default = "default_mode")]
    pub mode: Mode,

    /// Exit with an error when the candidate is incompatible
    #[serde(default = "default_true")]
    pub fail_on_incompatible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON reports
    #[serde(default = "default_true")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where the schema chronology lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Directory of versioned schema files, e.g. `v1.2.0.avsc`
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_mode() -> Mode {
    Mode::CanReadLatest
}

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    "avsc".to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            fail_on_incompatible: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty: true,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
        }
    }
}

impl CompatConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific file on top of the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = ["compat.toml", ".compat.toml", "config/compat.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "avro-compat") {
            let xdg_config = config_dir.config_dir().join("compat.toml");
            if xdg_config.exists() {
                debug!(path = %xdg_config.display(), "found user config");
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // COMPAT__POLICY__MODE=full overrides policy.mode
        builder = builder.add_source(
            Environment::with_prefix("COMPAT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
