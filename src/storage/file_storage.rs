use crate::{
    error::{Result, SlateError},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File-based storage: one JSON file per key inside a data directory
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const EXTENSION: &'static str = "json";

    /// Creates a FileStorage writing into `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn value_file(&self, key: &str) -> PathBuf {
        self.root_path.join(format!("{}.{}", key, Self::EXTENSION))
    }

    fn temp_file(&self, key: &str) -> PathBuf {
        self.root_path.join(format!(".{}.{}.tmp", key, Self::EXTENSION))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    fn check_key(key: &str) -> Result<()> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if valid {
            Ok(())
        } else {
            Err(SlateError::StorageError(format!(
                "invalid storage key: {:?}",
                key
            )))
        }
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Self::check_key(key)?;
        let file_path = self.value_file(key);

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        Self::check_key(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        // Write beside the target and rename so a crash never leaves a torn file
        let temp_path = self.temp_file(key);
        fs::write(&temp_path, value).await?;
        fs::rename(&temp_path, self.value_file(key)).await?;

        debug!(key, bytes = value.len(), "snapshot written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        Self::check_key(key)?;
        let file_path = self.value_file(key);

        if !file_path.exists() {
            return Err(SlateError::SnapshotNotFound {
                key: key.to_string(),
            });
        }

        fs::remove_file(file_path).await?;
        Ok(())
    }
}
