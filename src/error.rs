use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlateError>;

#[derive(Debug, Error)]
pub enum SlateError {
    #[error("Invalid board snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    #[error("No snapshot stored under key: {key}")]
    SnapshotNotFound { key: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[cfg(feature = "sqlite-storage")]
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
}

impl SlateError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            reason: reason.into(),
        }
    }
}

impl From<toml::de::Error> for SlateError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}
