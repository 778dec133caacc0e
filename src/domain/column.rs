use crate::domain::ids::{CardId, ColumnId};
use serde::{Deserialize, Serialize};

/// A board column; `card_ids` is both membership and top-to-bottom order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub card_ids: Vec<CardId>,
}

impl Column {
    pub fn new(id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            card_ids: Vec::new(),
        }
    }

    pub fn with_cards<I, C>(mut self, card_ids: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CardId>,
    {
        self.card_ids = card_ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn position_of(&self, card_id: &str) -> Option<usize> {
        self.card_ids.iter().position(|id| id == card_id)
    }

    pub fn len(&self) -> usize {
        self.card_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.card_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_json_shape() {
        let column = Column::new(ColumnId::from("todo"), "To Do").with_cards(["card-3", "card-4"]);

        let value = serde_json::to_value(&column).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "todo", "title": "To Do", "cardIds": ["card-3", "card-4"]})
        );
    }

    #[test]
    fn test_position_of() {
        let column = Column::new(ColumnId::from("todo"), "To Do").with_cards(["a", "b", "c"]);

        assert_eq!(column.position_of("c"), Some(2));
        assert_eq!(column.position_of("z"), None);
        assert_eq!(column.len(), 3);
    }
}
