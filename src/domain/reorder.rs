//! Positional move operations: cards within and across columns, and columns
//! within the column order.
//!
//! All moves use the same remove-then-insert rule: the element at
//! `source_index` is removed first, and `dest_index` is read against the
//! sequence that results. For a move inside one sequence, that sequence is
//! already one element shorter. A `source_index` past the end makes the move
//! a no-op. A `dest_index` past the end is clamped, so the element is
//! appended.

use crate::domain::{
    board::Board,
    ids::{CardId, ColumnId},
};
use std::sync::Arc;
use tracing::debug;

/// Removes the element at `index`, or returns `None` when out of range
fn take_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

/// Inserts at `index`, clamped to the end of the sequence
fn insert_clamped<T>(items: &mut Vec<T>, index: usize, item: T) {
    let index = index.min(items.len());
    items.insert(index, item);
}

impl Board {
    /// Moves a card to `dest_index` of `dest_column_id`.
    ///
    /// The element removed from the source column is the one at
    /// `source_index`. Whether it equals `card_id` is not checked; the caller
    /// (a drag gesture reporting both) is trusted to be consistent. Use
    /// [`Board::move_card_to`] to let the board find the card instead.
    pub fn move_card(
        &self,
        card_id: &CardId,
        source_column_id: &str,
        dest_column_id: &str,
        source_index: usize,
        dest_index: usize,
    ) -> Board {
        let (Some(source), Some(dest)) = (
            self.columns.get(source_column_id),
            self.columns.get(dest_column_id),
        ) else {
            debug!(
                source_column_id,
                dest_column_id, "move_card: unknown column"
            );
            return self.clone();
        };
        if source_index >= source.card_ids.len() {
            debug!(
                %card_id,
                source_column_id,
                source_index,
                "move_card: source index out of range"
            );
            return self.clone();
        }

        let mut next = self.clone();
        if source_column_id == dest_column_id {
            let mut card_ids = source.card_ids.clone();
            take_at(&mut card_ids, source_index);
            insert_clamped(&mut card_ids, dest_index, card_id.clone());
            if let Some(column) = next.columns.get_mut(source_column_id) {
                Arc::make_mut(column).card_ids = card_ids;
            }
        } else {
            let mut source_ids = source.card_ids.clone();
            take_at(&mut source_ids, source_index);
            let mut dest_ids = dest.card_ids.clone();
            insert_clamped(&mut dest_ids, dest_index, card_id.clone());

            if let Some(column) = next.columns.get_mut(source_column_id) {
                Arc::make_mut(column).card_ids = source_ids;
            }
            if let Some(column) = next.columns.get_mut(dest_column_id) {
                Arc::make_mut(column).card_ids = dest_ids;
            }
        }

        debug!(
            %card_id,
            source_column_id,
            dest_column_id,
            source_index,
            dest_index,
            "card moved"
        );
        next
    }

    /// Moves a card by id, looking up its current column and position
    pub fn move_card_to(&self, card_id: &str, dest_column_id: &str, dest_index: usize) -> Board {
        let Some((source_column_id, source_index)) = self.locate_card(card_id) else {
            debug!(card_id, "move_card_to: card not in any column");
            return self.clone();
        };

        self.move_card(
            &CardId::from(card_id),
            source_column_id.as_str(),
            dest_column_id,
            source_index,
            dest_index,
        )
    }

    /// Moves the column at `source_index` of the column order to `dest_index`
    pub fn reorder_columns(&self, source_index: usize, dest_index: usize) -> Board {
        let mut column_order: Vec<ColumnId> = self.column_order.clone();
        let Some(moved) = take_at(&mut column_order, source_index) else {
            debug!(source_index, "reorder_columns: source index out of range");
            return self.clone();
        };
        insert_clamped(&mut column_order, dest_index, moved);

        debug!(source_index, dest_index, "columns reordered");
        Board {
            column_order,
            ..self.clone()
        }
    }
}
