//! Dashboard configuration (TOML).
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! data_file = "event_impact_results.xlsx"
//! strict = false
//! ranking = "alphabetical"   # or "fastest"
//!
//! [tui]
//! tick_ms = 50
//! persist = true
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::load::{LoadOptions, DEFAULT_DATA_FILE};
use crate::ranking::RankingOrder;

/// File picked up from the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "eventlab.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Results file; relative paths resolve against the working directory.
    pub data_file: PathBuf,
    /// Fail the load on any rejected row.
    pub strict: bool,
    /// Speed chart bar order.
    pub ranking: RankingOrder,
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Input poll interval, milliseconds.
    pub tick_ms: u64,
    /// Save and restore selections between sessions.
    pub persist: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            strict: false,
            ranking: RankingOrder::default(),
            tui: TuiConfig::default(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 50,
            persist: true,
        }
    }
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Explicit path, else `eventlab.toml` in `cwd` if present, else defaults.
    ///
    /// An explicit path that does not exist is an error; a missing
    /// `eventlab.toml` is not.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::debug!("config: {}", path.display());
            return Self::from_file(path);
        }
        let local = cwd.join(CONFIG_FILE_NAME);
        if local.is_file() {
            log::debug!("config: {}", local.display());
            return Self::from_file(&local);
        }
        log::debug!("config: defaults");
        Ok(Self::default())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            strict: self.strict,
        }
    }
}
