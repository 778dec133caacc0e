//! Write-through owner of the current board snapshot.
//!
//! The session loads the board once (falling back to the seed), applies engine
//! operations to it one at a time, and saves every snapshot that differs from
//! the previous one. No-ops never touch storage.

use crate::{
    domain::{seed_board, Board, CardId, CardPatch, ColumnId, IdGenerator, Label},
    error::Result,
    storage::{load_or_seed, Storage},
};
use tracing::{info, warn};

pub struct BoardSession<S> {
    storage: S,
    ids: Box<dyn IdGenerator>,
    key: String,
    board: Board,
}

impl<S: Storage> BoardSession<S> {
    /// Loads the board stored under `key`, or the seed board
    pub async fn open(
        storage: S,
        ids: impl IdGenerator + 'static,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let board = load_or_seed(&storage, &key).await;
        info!(
            key = %key,
            columns = board.column_count(),
            cards = board.card_count(),
            "board session opened"
        );
        Self {
            storage,
            ids: Box::new(ids),
            key,
            board,
        }
    }

    /// The current snapshot
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Makes `next` current and persists it if it differs from the current
    /// board. Returns whether anything changed.
    ///
    /// The new board stays current even when the save fails.
    async fn commit(&mut self, next: Board) -> Result<bool> {
        if next == self.board {
            return Ok(false);
        }
        self.board = next;
        if let Err(err) = self.storage.save_board(&self.key, &self.board).await {
            warn!(key = %self.key, error = %err, "failed to persist board");
            return Err(err);
        }
        Ok(true)
    }

    pub async fn add_card(
        &mut self,
        column_id: &str,
        title: impl Into<String>,
        description: Option<String>,
        labels: Option<Vec<Label>>,
    ) -> Result<Option<CardId>> {
        let (next, card_id) =
            self.board
                .add_card(self.ids.as_ref(), column_id, title, description, labels);
        self.commit(next).await?;
        Ok(card_id)
    }

    pub async fn update_card(&mut self, card_id: &str, patch: CardPatch) -> Result<bool> {
        let next = self.board.update_card(card_id, patch);
        self.commit(next).await
    }

    pub async fn delete_card(&mut self, card_id: &str) -> Result<bool> {
        let next = self.board.delete_card(card_id);
        self.commit(next).await
    }

    pub async fn add_column(&mut self, title: impl Into<String>) -> Result<Option<ColumnId>> {
        let (next, column_id) = self.board.add_column(self.ids.as_ref(), title);
        self.commit(next).await?;
        Ok(column_id)
    }

    pub async fn update_column(&mut self, column_id: &str, title: impl Into<String>) -> Result<bool> {
        let next = self.board.update_column(column_id, title);
        self.commit(next).await
    }

    pub async fn delete_column(&mut self, column_id: &str) -> Result<bool> {
        let next = self.board.delete_column(column_id);
        self.commit(next).await
    }

    pub async fn move_card(
        &mut self,
        card_id: &CardId,
        source_column_id: &str,
        dest_column_id: &str,
        source_index: usize,
        dest_index: usize,
    ) -> Result<bool> {
        let next = self.board.move_card(
            card_id,
            source_column_id,
            dest_column_id,
            source_index,
            dest_index,
        );
        self.commit(next).await
    }

    pub async fn move_card_to(
        &mut self,
        card_id: &str,
        dest_column_id: &str,
        dest_index: usize,
    ) -> Result<bool> {
        let next = self.board.move_card_to(card_id, dest_column_id, dest_index);
        self.commit(next).await
    }

    pub async fn reorder_columns(&mut self, source_index: usize, dest_index: usize) -> Result<bool> {
        let next = self.board.reorder_columns(source_index, dest_index);
        self.commit(next).await
    }

    /// Replaces the board with the seed board and saves it
    pub async fn reset(&mut self) -> Result<()> {
        info!(key = %self.key, "resetting board to seed");
        self.board = seed_board();
        self.storage.save_board(&self.key, &self.board).await
    }
}
