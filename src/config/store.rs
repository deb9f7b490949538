//! Document store configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Directory for the file backend
    pub data_dir: Option<PathBuf>,
}

/// Which document store to use
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

impl StoreConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StoreBackend::File
            && self.data_dir.as_ref().map_or(true, |d| d.as_os_str().is_empty())
        {
            return Err(ValidationError::MissingRequired("STORE__DATA_DIR"));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            data_dir: None,
        }
    }
}
