//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::nav::listing::ListingOptions;

/// Top-level application configuration.
///
/// All fields have sensible defaults so idxfm works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub operations: OperationsConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Loads the file at [`Config::default_path`], or returns defaults if
    /// there is none.
    ///
    /// # Errors
    ///
    /// Anything [`Config::load`] reports other than a missing file.
    pub fn load_default(home: &Path) -> CoreResult<Self> {
        match Self::load(&Self::default_path(home)) {
            Err(CoreError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// `~/.config/idxfm/config.toml` relative to `home`.
    pub fn default_path(home: &Path) -> PathBuf {
        home.join(".config").join("idxfm").join("config.toml")
    }

    /// Listing options derived from the `[general]` section.
    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            show_hidden: self.general.show_hidden,
            dirs_first: self.general.dirs_first,
        }
    }
}

/// General browsing preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory to start in; `~` is expanded. Defaults to the home directory.
    #[serde(default)]
    pub start_dir: Option<String>,
    #[serde(default = "default_true")]
    pub show_hidden: bool,
    #[serde(default)]
    pub dirs_first: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            start_dir: None,
            show_hidden: true,
            dirs_first: false,
        }
    }
}

/// Bulk operation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationsConfig {
    #[serde(default = "default_true")]
    pub preserve_timestamps: bool,
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            preserve_timestamps: true,
            confirm_delete: true,
        }
    }
}

fn default_true() -> bool {
    true
}
