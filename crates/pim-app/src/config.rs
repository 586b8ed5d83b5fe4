//! # Configuration
//!
//! Optional YAML file:
//!
//! ```yaml
//! storage_key: state
//! data_dir: .pim
//! log_format: text   # or json
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pim_state::{validate_key, BlobError, DEFAULT_STORAGE_KEY};

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".pim";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PimConfig {
    /// Blob key the snapshot is stored under.
    pub storage_key: String,
    /// Directory holding the snapshot file.
    pub data_dir: PathBuf,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for PimConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_format: LogFormat::Text,
        }
    }
}

/// Error loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration YAML.
    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The storage key cannot name a snapshot file.
    #[error("invalid storage_key: {0}")]
    InvalidStorageKey(#[source] BlobError),
}

impl PimConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: PimConfig = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text, path)
    }

    /// Load from `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        validate_key(&self.storage_key).map_err(ConfigError::InvalidStorageKey)
    }
}
