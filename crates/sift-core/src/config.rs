//! Configuration loaded from `sift.toml`.
//!
//! Every field has a default, so an absent file or an empty table is valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SiftError};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "sift.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    pub export: ExportSettings,
}

/// Settings for CSV export and download hand-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Filename prefix when exporting the displayed search results.
    pub results_prefix: String,
    /// Filename prefix when exporting the full record collection.
    pub records_prefix: String,
    /// Filename segment used in place of an empty query.
    pub empty_query_token: String,
    /// How long a staged download stays alive after hand-off.
    pub release_delay_ms: u64,
    /// Directory exported files are delivered into.
    pub output_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            results_prefix: "results".to_string(),
            records_prefix: "records".to_string(),
            empty_query_token: "all".to_string(),
            release_delay_ms: 1000,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportSettings {
    #[must_use]
    pub fn release_delay(&self) -> Duration {
        Duration::from_millis(self.release_delay_ms)
    }
}

impl SiftConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Io`] if the file cannot be read and
    /// [`SiftError::Config`] if it is not valid TOML for this schema.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Config`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SiftConfig = toml::from_str(content)?;
        if config.export.empty_query_token.trim().is_empty() {
            return Err(SiftError::Config(
                "export.empty_query_token must not be blank".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load from an explicit path, or from [`DEFAULT_CONFIG_FILE`] in the
    /// working directory if it exists, or fall back to defaults.
    ///
    /// # Errors
    ///
    /// An explicit path that cannot be loaded is an error; a missing default
    /// file is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
