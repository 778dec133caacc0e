use crate::{
    error::{Result, SlateError},
    storage::Storage,
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

/// SQLite-backed key-value storage for board snapshots
pub struct SqliteStorage {
    connection: Mutex<Connection>,
}

impl SqliteStorage {
    const SCHEMA: &'static str =
        "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)";

    /// Opens (or creates) the database at `database_path`
    pub fn new(database_path: impl AsRef<Path>) -> Result<Self> {
        Self::with_connection(Connection::open(database_path)?)
    }

    /// Opens a private in-memory database
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection.execute(Self::SCHEMA, [])?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| SlateError::StorageError("sqlite connection lock poisoned".to_string()))
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .connection()?
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.connection()?.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let removed = self
            .connection()?
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        if removed == 0 {
            return Err(SlateError::SnapshotNotFound {
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed_board;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_overwrites() {
        let storage = SqliteStorage::in_memory().unwrap();

        storage.save("k", "one").await.unwrap();
        storage.save("k", "two").await.unwrap();

        assert_eq!(storage.load("k").await.unwrap().as_deref(), Some("two"));
        assert!(storage.load("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_board_persists_across_connections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slate.db");
        let board = seed_board().delete_column("done");

        SqliteStorage::new(&path)
            .unwrap()
            .save_board("slate-board", &board)
            .await
            .unwrap();

        let reopened = SqliteStorage::new(&path).unwrap();
        let loaded = reopened.load_board("slate-board").await.unwrap().unwrap();
        assert_eq!(loaded, board);
    }

    #[tokio::test]
    async fn test_remove_missing_key() {
        let storage = SqliteStorage::in_memory().unwrap();
        assert!(matches!(
            storage.remove("nope").await,
            Err(SlateError::SnapshotNotFound { .. })
        ));
    }
}
