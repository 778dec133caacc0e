use crate::domain::ids::CardId;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

/// Color key of a label, from a fixed palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Bug,
    Feature,
    Enhancement,
    Urgent,
    Design,
}

impl LabelColor {
    pub const ALL: [LabelColor; 5] = [
        Self::Bug,
        Self::Feature,
        Self::Enhancement,
        Self::Urgent,
        Self::Design,
    ];

    /// Key used on the wire (bug, feature, ...)
    pub fn key(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Enhancement => "enhancement",
            Self::Urgent => "urgent",
            Self::Design => "design",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Bug => "Bug",
            Self::Feature => "Feature",
            Self::Enhancement => "Enhancement",
            Self::Urgent => "Urgent",
            Self::Design => "Design",
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A label attached to a card.
///
/// Labels are plain values copied onto each card; there is no shared label
/// registry, so two cards may carry identical labels independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: LabelColor,
}

impl Label {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: LabelColor) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
        }
    }

    /// The stock label for a palette color (id and color share the key)
    pub fn from_color(color: LabelColor) -> Self {
        Self::new(color.key(), color.display_name(), color)
    }

    /// One label per palette color, in palette order
    pub fn defaults() -> Vec<Label> {
        LabelColor::ALL.iter().copied().map(Self::from_color).collect()
    }
}

/// Drops labels whose id was already seen, keeping the first occurrence
pub fn dedup_labels(labels: Vec<Label>) -> Vec<Label> {
    let mut seen = HashSet::new();
    labels
        .into_iter()
        .filter(|label| seen.insert(label.id.clone()))
        .collect()
}

/// Current time at the millisecond precision snapshots are stored with
pub(crate) fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Card {
    /// Creates a card stamped with the current time
    pub fn new(id: CardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            labels: Vec::new(),
            created_at: now_millis(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = dedup_labels(labels);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn has_label(&self, label_id: &str) -> bool {
        self.labels.iter().any(|label| label.id == label_id)
    }

    /// Merges the patch into this card, leaving unset fields untouched
    pub(crate) fn apply(&mut self, patch: CardPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(labels) = patch.labels {
            self.labels = dedup_labels(labels);
        }
    }
}

/// Partial update of a card. `None` means "leave as is".
///
/// `description` is doubly optional so a patch can clear it:
/// `Some(None)` removes the description, `Some(Some(..))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub labels: Option<Vec<Label>>,
}

impl CardPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.labels.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_label_defaults() {
        let labels = Label::defaults();

        assert_eq!(labels.len(), 5);
        assert_eq!(labels[0], Label::new("bug", "Bug", LabelColor::Bug));
        assert_eq!(labels[4].name, "Design");
    }

    #[test]
    fn test_label_color_wire_format() {
        let json = serde_json::to_string(&LabelColor::Enhancement).unwrap();
        assert_eq!(json, "\"enhancement\"");

        assert!(serde_json::from_str::<LabelColor>("\"chartreuse\"").is_err());
    }

    #[test]
    fn test_dedup_labels_keeps_first() {
        let labels = vec![
            Label::new("x", "First", LabelColor::Bug),
            Label::from_color(LabelColor::Urgent),
            Label::new("x", "Second", LabelColor::Design),
        ];

        let deduped = dedup_labels(labels);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name, "First");
    }

    #[test]
    fn test_card_json_shape() {
        let created = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let card = Card::new(CardId::from("card-1"), "Write docs")
            .with_labels(vec![Label::from_color(LabelColor::Feature)])
            .with_created_at(created);

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["id"], "card-1");
        assert_eq!(value["createdAt"], 1_700_000_000_123i64);
        assert_eq!(value["labels"][0]["color"], "feature");
        assert!(value.get("description").is_none());

        let back: Card = serde_json::from_value(value).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn test_card_without_labels_field_deserializes() {
        let json = r#"{"id":"card-9","title":"Bare","createdAt":0}"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert!(card.labels.is_empty());
        assert!(card.description.is_none());
    }

    #[test]
    fn test_apply_patch_merges_only_given_fields() {
        let mut card = Card::new(CardId::from("card-1"), "Original").with_description("Keep me");

        card.apply(CardPatch::new().title("Renamed"));
        assert_eq!(card.title, "Renamed");
        assert_eq!(card.description.as_deref(), Some("Keep me"));

        card.apply(CardPatch::new().clear_description());
        assert!(card.description.is_none());
        assert_eq!(card.title, "Renamed");
    }

    #[test]
    fn test_apply_patch_dedups_labels() {
        let mut card = Card::new(CardId::from("card-1"), "Test");
        let bug = Label::from_color(LabelColor::Bug);

        card.apply(CardPatch::new().labels(vec![bug.clone(), bug]));

        assert_eq!(card.labels.len(), 1);
        assert!(card.has_label("bug"));
    }
}
