use crate::{
    domain::{
        card::Card,
        column::Column,
        ids::{CardId, ColumnId},
    },
    error::{Result, SlateError},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

/// Kanban board snapshot.
///
/// Entries are reference counted so that a snapshot derived from another one
/// shares every card and column it did not touch. Operations live in
/// `edit.rs` and `reorder.rs` and always return a new `Board`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub columns: HashMap<ColumnId, Arc<Column>>,
    pub cards: HashMap<CardId, Arc<Card>>,
    pub column_order: Vec<ColumnId>,
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from columns in display order and the cards they list.
    ///
    /// The result is not validated; call [`Board::validate`] when the input
    /// comes from outside the crate.
    pub fn from_parts(columns: Vec<Column>, cards: Vec<Card>) -> Self {
        let column_order = columns.iter().map(|c| c.id.clone()).collect();
        Self {
            columns: columns
                .into_iter()
                .map(|c| (c.id.clone(), Arc::new(c)))
                .collect(),
            cards: cards
                .into_iter()
                .map(|c| (c.id.clone(), Arc::new(c)))
                .collect(),
            column_order,
        }
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.get(id).map(Arc::as_ref)
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.get(id).map(Arc::as_ref)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Columns in display order
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order.iter().filter_map(|id| self.column(id.as_str()))
    }

    /// Cards of a column in display order; empty for an unknown column
    pub fn cards_in(&self, column_id: &str) -> Vec<&Card> {
        self.column(column_id)
            .map(|column| {
                column
                    .card_ids
                    .iter()
                    .filter_map(|id| self.card(id.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Finds the column holding a card and the card's position within it
    pub fn locate_card(&self, card_id: &str) -> Option<(ColumnId, usize)> {
        self.column_order.iter().find_map(|column_id| {
            let column = self.columns.get(column_id)?;
            column
                .position_of(card_id)
                .map(|index| (column_id.clone(), index))
        })
    }

    /// Checks every structural invariant of the board.
    ///
    /// Returns the first violation found as [`SlateError::InvalidSnapshot`].
    pub fn validate(&self) -> Result<()> {
        // Column order is a permutation of the column keys
        let mut ordered = HashSet::new();
        for id in &self.column_order {
            if !ordered.insert(id) {
                return Err(SlateError::invalid(format!(
                    "column '{}' appears more than once in columnOrder",
                    id
                )));
            }
            if !self.columns.contains_key(id) {
                return Err(SlateError::invalid(format!(
                    "columnOrder references unknown column '{}'",
                    id
                )));
            }
        }
        if ordered.len() != self.columns.len() {
            let missing = self
                .columns
                .keys()
                .find(|id| !ordered.contains(id))
                .map(ToString::to_string)
                .unwrap_or_default();
            return Err(SlateError::invalid(format!(
                "column '{}' is missing from columnOrder",
                missing
            )));
        }

        // Entry ids match their keys, titles are non-blank
        for (key, column) in &self.columns {
            if &column.id != key {
                return Err(SlateError::invalid(format!(
                    "column stored under '{}' has id '{}'",
                    key, column.id
                )));
            }
            if is_blank(&column.title) {
                return Err(SlateError::invalid(format!(
                    "column '{}' has an empty title",
                    key
                )));
            }
        }
        for (key, card) in &self.cards {
            if &card.id != key {
                return Err(SlateError::invalid(format!(
                    "card stored under '{}' has id '{}'",
                    key, card.id
                )));
            }
            if is_blank(&card.title) {
                return Err(SlateError::invalid(format!(
                    "card '{}' has an empty title",
                    key
                )));
            }
            let mut label_ids = HashSet::new();
            for label in &card.labels {
                if !label_ids.insert(label.id.as_str()) {
                    return Err(SlateError::invalid(format!(
                        "card '{}' carries label '{}' more than once",
                        key, label.id
                    )));
                }
            }
        }

        // Every listed card exists and belongs to exactly one column
        let mut owner: HashMap<&CardId, &ColumnId> = HashMap::new();
        for (column_id, column) in &self.columns {
            for card_id in &column.card_ids {
                if !self.cards.contains_key(card_id) {
                    return Err(SlateError::invalid(format!(
                        "column '{}' lists unknown card '{}'",
                        column_id, card_id
                    )));
                }
                if let Some(previous) = owner.insert(card_id, column_id) {
                    return Err(SlateError::invalid(format!(
                        "card '{}' is listed in both '{}' and '{}'",
                        card_id, previous, column_id
                    )));
                }
            }
        }
        if let Some(orphan) = self.cards.keys().find(|id| !owner.contains_key(id)) {
            return Err(SlateError::invalid(format!(
                "card '{}' is not listed in any column",
                orphan
            )));
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// True when a title would be empty after trimming
pub(crate) fn is_blank(title: &str) -> bool {
    title.trim().is_empty()
}
