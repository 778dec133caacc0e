//! Configuration file loading.
//!
//! Slate reads an optional `config.toml` (conventionally `.slate/config.toml`).
//! Every field has a default, so a missing file or a missing section is fine.

use crate::{
    error::Result,
    storage::{MemoryStorage, Storage},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[cfg(feature = "file-storage")]
use crate::storage::FileStorage;

/// Root configuration loaded from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlateConfig {
    pub storage: StorageConfig,
}

/// Where snapshots are kept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

/// Storage section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the board snapshot is stored under
    pub key: String,
    /// Directory for the file backend
    pub data_dir: PathBuf,
    pub backend: StorageBackend,
}

impl StorageConfig {
    pub const DEFAULT_KEY: &'static str = "slate-board";
    pub const DEFAULT_DATA_DIR: &'static str = ".slate";

    #[cfg(feature = "file-storage")]
    pub fn open_file_storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }

    /// Builds the configured backend
    pub fn open_storage(&self) -> Result<Box<dyn Storage>> {
        match self.backend {
            #[cfg(feature = "file-storage")]
            StorageBackend::File => Ok(Box::new(self.open_file_storage())),
            #[cfg(not(feature = "file-storage"))]
            StorageBackend::File => Err(crate::error::SlateError::ConfigError(
                "file backend requires the `file-storage` feature".to_string(),
            )),
            StorageBackend::Memory => Ok(Box::new(MemoryStorage::new())),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: Self::DEFAULT_KEY.to_string(),
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            backend: StorageBackend::default(),
        }
    }
}

impl SlateConfig {
    pub const CONFIG_FILE: &'static str = "config.toml";

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads configuration from `path`, using defaults when the file is absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads `config.toml` from inside a data directory
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(dir.as_ref().join(Self::CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SlateError;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SlateConfig::default();

        assert_eq!(config.storage.key, "slate-board");
        assert_eq!(config.storage.data_dir, PathBuf::from(".slate"));
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = SlateConfig::from_toml_str(
            r#"
            [storage]
            key = "work-board"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.key, "work-board");
        assert_eq!(config.storage.data_dir, PathBuf::from(".slate"));
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(SlateConfig::from_toml_str("").unwrap(), SlateConfig::default());
    }

    #[test]
    fn test_memory_backend() {
        let config = SlateConfig::from_toml_str("[storage]\nbackend = \"memory\"\n").unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = SlateConfig::from_toml_str("[storage\nkey = 1");
        assert!(matches!(result, Err(SlateError::ConfigError(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = SlateConfig::load_from_dir(temp_dir.path()).unwrap();

        assert_eq!(config, SlateConfig::default());
    }

    #[tokio::test]
    async fn test_open_configured_memory_storage() {
        let config = SlateConfig::from_toml_str("[storage]\nbackend = \"memory\"\n").unwrap();
        let storage = config.storage.open_storage().unwrap();

        storage.save("k", "v").await.unwrap();
        assert_eq!(storage.load("k").await.unwrap().as_deref(), Some("v"));
    }

    #[cfg(feature = "file-storage")]
    #[tokio::test]
    async fn test_open_configured_file_storage() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = StorageConfig::default();
        config.data_dir = temp_dir.path().join("data");

        let storage = config.open_storage().unwrap();
        storage.save(&config.key, "{}").await.unwrap();

        assert!(temp_dir.path().join("data").join("slate-board.json").exists());
    }

    #[test]
    fn test_load_from_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "[storage]\ndata_dir = \"boards\"\n",
        )
        .unwrap();

        let config = SlateConfig::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("boards"));
        assert_eq!(config.storage.key, "slate-board");
    }
}
