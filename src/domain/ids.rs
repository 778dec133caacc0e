use serde::{Deserialize, Serialize};
use std::{
    borrow::Borrow,
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Identifier of a card (e.g., card-1, card-3f2a...)
    CardId
);

string_id!(
    /// Identifier of a column (e.g., backlog, column-9c1e...)
    ColumnId
);

/// Source of fresh identifiers for cards and columns.
///
/// Callers never choose ids for new entities; every add operation asks the
/// generator it was handed.
pub trait IdGenerator: Send + Sync {
    fn next_card_id(&self) -> CardId;

    fn next_column_id(&self) -> ColumnId;
}

/// Random v4 UUID identifiers, prefixed by entity kind
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_card_id(&self) -> CardId {
        CardId(format!("card-{}", Uuid::new_v4()))
    }

    fn next_column_id(&self) -> ColumnId {
        ColumnId(format!("column-{}", Uuid::new_v4()))
    }
}

/// Counter-based identifiers (card-1, card-2, column-1, ...).
///
/// Deterministic, so tests and demos can predict the ids they get back. The
/// counters are independent per entity kind.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next_card: AtomicU64,
    next_column: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Starts both counters at `first`. Add operations skip ids already on
    /// the board, so this only changes which ids come back.
    pub fn starting_at(first: u64) -> Self {
        Self {
            next_card: AtomicU64::new(first),
            next_column: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_card_id(&self) -> CardId {
        let n = self.next_card.fetch_add(1, Ordering::Relaxed);
        CardId(format!("card-{}", n))
    }

    fn next_column_id(&self) -> ColumnId {
        let n = self.next_column.fetch_add(1, Ordering::Relaxed);
        ColumnId(format!("column-{}", n))
    }
}
