pub mod board;
pub mod card;
pub mod column;
mod edit;
pub mod ids;
mod reorder;
pub mod seed;

pub use board::Board;
pub use card::{Card, CardPatch, Label, LabelColor};
pub use column::Column;
pub use ids::{CardId, ColumnId, IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use seed::seed_board;
