//! Add, update and delete operations on a [`Board`] snapshot.
//!
//! Every operation borrows the current snapshot and returns a new one. A
//! reference to a missing card or column, or a blank title, turns the
//! operation into a no-op that returns an equal board.

use crate::domain::{
    board::{is_blank, Board},
    card::{Card, CardPatch, Label},
    column::Column,
    ids::{CardId, ColumnId, IdGenerator},
};
use std::{collections::HashMap, hash::Hash, sync::Arc};
use tracing::{debug, warn};

/// Generator draws allowed before an add gives up on finding an unused id
const MAX_ID_ATTEMPTS: usize = 256;

/// Draws ids until one is not already a key of `taken`
fn fresh_id<K: Eq + Hash, V>(taken: &HashMap<K, V>, mut draw: impl FnMut() -> K) -> Option<K> {
    (0..MAX_ID_ATTEMPTS)
        .map(|_| draw())
        .find(|id| !taken.contains_key(id))
}

impl Board {
    /// Appends a new card to the end of a column.
    ///
    /// The title is stored exactly as given; callers trim it. Returns no id
    /// when the column does not exist or the title is blank. The blank-title
    /// no-op departs from the web client, which stored any title it was given.
    ///
    /// Ids the generator hands out that already name a card are skipped.
    pub fn add_card(
        &self,
        ids: &dyn IdGenerator,
        column_id: &str,
        title: impl Into<String>,
        description: Option<String>,
        labels: Option<Vec<Label>>,
    ) -> (Board, Option<CardId>) {
        let title = title.into();
        if !self.columns.contains_key(column_id) {
            debug!(column_id, "add_card: unknown column");
            return (self.clone(), None);
        }
        if is_blank(&title) {
            debug!(column_id, "add_card: blank title");
            return (self.clone(), None);
        }

        let Some(card_id) = fresh_id(&self.cards, || ids.next_card_id()) else {
            warn!(column_id, "add_card: no unused card id available");
            return (self.clone(), None);
        };
        let mut card = Card::new(card_id.clone(), title).with_labels(labels.unwrap_or_default());
        card.description = description;

        let mut next = self.clone();
        next.cards.insert(card_id.clone(), Arc::new(card));
        if let Some(column) = next.columns.get_mut(column_id) {
            Arc::make_mut(column).card_ids.push(card_id.clone());
        }

        debug!(%card_id, column_id, "card added");
        (next, Some(card_id))
    }

    /// Merges `patch` into an existing card
    pub fn update_card(&self, card_id: &str, patch: CardPatch) -> Board {
        if !self.cards.contains_key(card_id) {
            debug!(card_id, "update_card: unknown card");
            return self.clone();
        }
        if patch.is_empty() {
            return self.clone();
        }
        if patch.title.as_deref().is_some_and(is_blank) {
            debug!(card_id, "update_card: blank title");
            return self.clone();
        }

        let mut next = self.clone();
        if let Some(card) = next.cards.get_mut(card_id) {
            Arc::make_mut(card).apply(patch);
        }

        debug!(card_id, "card updated");
        next
    }

    /// Removes a card from its column and from the card map
    pub fn delete_card(&self, card_id: &str) -> Board {
        let Some((column_id, _)) = self.locate_card(card_id) else {
            debug!(card_id, "delete_card: card not in any column");
            return self.clone();
        };

        let mut next = self.clone();
        next.cards.remove(card_id);
        if let Some(column) = next.columns.get_mut(&column_id) {
            Arc::make_mut(column).card_ids.retain(|id| id != card_id);
        }

        debug!(card_id, %column_id, "card deleted");
        next
    }

    /// Appends a new empty column to the end of the column order.
    ///
    /// Like [`Board::add_card`], a blank title or an exhausted id generator
    /// turns this into a no-op.
    pub fn add_column(
        &self,
        ids: &dyn IdGenerator,
        title: impl Into<String>,
    ) -> (Board, Option<ColumnId>) {
        let title = title.into();
        if is_blank(&title) {
            debug!("add_column: blank title");
            return (self.clone(), None);
        }

        let Some(column_id) = fresh_id(&self.columns, || ids.next_column_id()) else {
            warn!("add_column: no unused column id available");
            return (self.clone(), None);
        };
        let mut next = self.clone();
        next.columns.insert(
            column_id.clone(),
            Arc::new(Column::new(column_id.clone(), title)),
        );
        next.column_order.push(column_id.clone());

        debug!(%column_id, "column added");
        (next, Some(column_id))
    }

    /// Renames a column
    pub fn update_column(&self, column_id: &str, title: impl Into<String>) -> Board {
        let title = title.into();
        if !self.columns.contains_key(column_id) {
            debug!(column_id, "update_column: unknown column");
            return self.clone();
        }
        if is_blank(&title) {
            debug!(column_id, "update_column: blank title");
            return self.clone();
        }

        let mut next = self.clone();
        if let Some(column) = next.columns.get_mut(column_id) {
            Arc::make_mut(column).title = title;
        }

        debug!(column_id, "column renamed");
        next
    }

    /// Removes a column together with every card it lists
    pub fn delete_column(&self, column_id: &str) -> Board {
        let mut next = self.clone();
        let Some(column) = next.columns.remove(column_id) else {
            debug!(column_id, "delete_column: unknown column");
            return next;
        };

        for card_id in &column.card_ids {
            next.cards.remove(card_id);
        }
        next.column_order.retain(|id| id != column_id);

        debug!(column_id, cards = column.card_ids.len(), "column deleted");
        next
    }
}
