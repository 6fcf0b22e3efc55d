//! Runtime configuration.
//!
//! Paths come from environment variables, falling back to the platform
//! config directory. Command-line flags override both.

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;

pub const ENV_DATA_FILE: &str = "RENTALCRM_DATA_FILE";
pub const ENV_EXPORT_DIR: &str = "RENTALCRM_EXPORT_DIR";

const APP_DIR: &str = "rentalcrm";
const DATA_FILE_NAME: &str = "crm_data.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CSV file holding the record table.
    pub data_file: PathBuf,
    /// Directory that exports are written to when no explicit path is given.
    pub export_dir: PathBuf,
}

impl Config {
    /// Load from the process environment.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), dirs::config_dir())
    }

    /// Resolve settings from a key lookup and a fallback config directory.
    pub fn from_lookup<F>(lookup: F, config_dir: Option<PathBuf>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_file = match non_empty(ENV_DATA_FILE) {
            Some(path) => PathBuf::from(path),
            None => {
                let dir = config_dir
                    .ok_or_else(|| anyhow!("Could not find config directory; set {}", ENV_DATA_FILE))?;
                dir.join(APP_DIR).join(DATA_FILE_NAME)
            }
        };

        let export_dir = non_empty(ENV_EXPORT_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            data_file,
            export_dir,
        })
    }

    /// Replace the data file when one was passed on the command line.
    #[must_use]
    pub fn with_data_file(mut self, data_file: Option<PathBuf>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path;
        }
        self
    }
}
