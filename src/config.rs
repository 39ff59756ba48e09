//! Application configuration
//!
//! Read from `config.toml` in the platform config directory. Every field is
//! optional; a missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progress::store::DEFAULT_ACTIVATION_CODES;
use crate::storage::FileStorage;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where progress blobs are stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Course catalog JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_path: Option<PathBuf>,
    /// Premium activation codes, matched case-insensitively
    #[serde(default = "default_activation_codes")]
    pub activation_codes: Vec<String>,
}

fn default_activation_codes() -> Vec<String> {
    DEFAULT_ACTIVATION_CODES.iter().map(|c| c.to_string()).collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            course_path: None,
            activation_codes: default_activation_codes(),
        }
    }
}

impl AppConfig {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("nailexam").join("config.toml"))
    }

    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content, path)
    }

    /// Load from the default location, or defaults when there is none
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileStorage::default_data_dir().map_err(|_| ConfigError::DataDirNotFound),
        }
    }

    /// Course catalog path, defaulting to `course.json` in the data directory
    pub fn resolve_course_path(&self) -> Result<PathBuf> {
        match &self.course_path {
            Some(path) => Ok(path.clone()),
            None => Ok(self.resolve_data_dir()?.join("course.json")),
        }
    }
}
