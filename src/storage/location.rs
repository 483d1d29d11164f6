//! Data directory resolution

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application directory name under the platform data directory
const APP_DIR: &str = "dayaction";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "DAYACTION_DATA_DIR";

/// Errors related to the data location
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Failed to locate a data directory; pass --data-dir or set DAYACTION_DATA_DIR")]
    NoDataDirectory,
}

/// Where persisted state lives on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLocation {
    pub data_dir: PathBuf,
}

impl DataLocation {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        DataLocation {
            data_dir: data_dir.into(),
        }
    }

    /// Resolve from an explicit path, then the environment, then the platform default
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, LocationError> {
        if let Some(path) = explicit {
            return Ok(DataLocation::new(path));
        }

        if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(DataLocation::new(path));
        }

        Self::platform_default()
    }

    /// `<platform data dir>/dayaction`
    pub fn platform_default() -> Result<Self, LocationError> {
        let base = dirs::data_dir().ok_or(LocationError::NoDataDirectory)?;
        Ok(DataLocation::new(base.join(APP_DIR)))
    }

    pub fn exists(&self) -> bool {
        self.data_dir.exists()
    }
}
