//! # Slate Core
//!
//! Board state engine for the Slate kanban board.
//!
//! A [`Board`] is an immutable snapshot of columns, cards and column order.
//! Every operation (add, update, delete, move, reorder) takes a snapshot and
//! returns a new, consistent one; invalid references degrade to no-ops.
//! Snapshots persist as JSON through the [`Storage`] trait, and a
//! [`BoardSession`] keeps the current snapshot written through to storage.

pub mod config;
pub mod domain;
pub mod error;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::{SlateConfig, StorageBackend, StorageConfig};
pub use domain::{
    board::Board,
    card::{Card, CardPatch, Label, LabelColor},
    column::Column,
    ids::{CardId, ColumnId, IdGenerator, SequentialIdGenerator, UuidIdGenerator},
    seed::seed_board,
};
pub use error::{Result, SlateError};
pub use session::BoardSession;
pub use storage::{load_or_seed, MemoryStorage, Storage};
