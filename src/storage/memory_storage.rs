//! In-memory storage backend.
//!
//! Values live in a map for the lifetime of the instance. Clones share the
//! same map, so a test can keep a handle and inspect what a session wrote.

use crate::{
    error::{Result, SlateError},
    storage::Storage,
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|_| SlateError::StorageError("memory storage lock poisoned".to_string()))
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.values().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values()?.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.values()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values()?
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| SlateError::SnapshotNotFound {
                key: key.to_string(),
            })
    }
}
