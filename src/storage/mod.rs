use crate::{
    domain::{seed_board, Board},
    error::Result,
};
use async_trait::async_trait;
use tracing::{debug, warn};

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
#[cfg(feature = "sqlite-storage")]
pub use sqlite_storage::SqliteStorage;

/// Key-value store holding serialized board snapshots
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the raw value stored under `key`, if any
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value
    async fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes the value under `key`
    async fn remove(&self, key: &str) -> Result<()>;

    /// Loads and validates the board stored under `key`
    async fn load_board(&self, key: &str) -> Result<Option<Board>> {
        let Some(raw) = self.load(key).await? else {
            return Ok(None);
        };
        let board: Board = serde_json::from_str(&raw)?;
        board.validate()?;
        Ok(Some(board))
    }

    /// Serializes the board and stores it under `key`
    async fn save_board(&self, key: &str, board: &Board) -> Result<()> {
        let json = serde_json::to_string(board)?;
        self.save(key, &json).await
    }
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for Box<T> {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }
}

/// Loads the board under `key`, falling back to the seed board.
///
/// A missing value, an unreadable store, malformed JSON or a snapshot that
/// breaks a board invariant all yield [`seed_board`]; the reason is logged and
/// never surfaced.
pub async fn load_or_seed<S: Storage + ?Sized>(storage: &S, key: &str) -> Board {
    match storage.load_board(key).await {
        Ok(Some(board)) => {
            debug!(
                key,
                columns = board.column_count(),
                cards = board.card_count(),
                "loaded stored board"
            );
            board
        }
        Ok(None) => {
            debug!(key, "no stored board, using seed");
            seed_board()
        }
        Err(err) => {
            warn!(key, error = %err, "stored board unusable, using seed");
            seed_board()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "slate-board";

    #[tokio::test]
    async fn test_load_or_seed_missing_key() {
        let storage = MemoryStorage::new();
        let board = load_or_seed(&storage, KEY).await;

        assert_eq!(board.card_count(), 7);
        assert_eq!(board.column_order, ["backlog", "todo", "in-progress", "done"]);
    }

    #[tokio::test]
    async fn test_load_or_seed_malformed_json() {
        let storage = MemoryStorage::new();
        storage.save(KEY, "{not json").await.unwrap();

        let board = load_or_seed(&storage, KEY).await;
        assert_eq!(board.column_count(), 4);
    }

    #[tokio::test]
    async fn test_load_or_seed_wrong_shape() {
        let storage = MemoryStorage::new();
        storage.save(KEY, r#"{"columns": []}"#).await.unwrap();

        let board = load_or_seed(&storage, KEY).await;
        assert_eq!(board.column_count(), 4);
    }

    #[tokio::test]
    async fn test_load_or_seed_invalid_snapshot() {
        let storage = MemoryStorage::new();
        let json = r#"{
            "columns": {"a": {"id": "a", "title": "A", "cardIds": ["ghost"]}},
            "cards": {},
            "columnOrder": ["a"]
        }"#;
        storage.save(KEY, json).await.unwrap();

        assert!(storage.load_board(KEY).await.is_err());
        let board = load_or_seed(&storage, KEY).await;
        assert!(board.column("a").is_none());
        assert_eq!(board.card_count(), 7);
    }

    #[tokio::test]
    async fn test_save_and_load_board() {
        let storage = MemoryStorage::new();
        let board = seed_board().reorder_columns(0, 3);

        storage.save_board(KEY, &board).await.unwrap();
        let loaded = storage.load_board(KEY).await.unwrap().unwrap();

        assert_eq!(loaded, board);
        assert_eq!(load_or_seed(&storage, KEY).await, board);
    }

    #[tokio::test]
    async fn test_load_board_missing_is_none() {
        let storage = MemoryStorage::new();
        assert!(storage.load_board(KEY).await.unwrap().is_none());
    }
}
