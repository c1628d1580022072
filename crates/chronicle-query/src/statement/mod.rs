//! Statement model.
//!
//! Statements name a logical record type, not a table; the compiler resolves
//! the table through the schema catalog. Builder methods consume and return
//! the statement, appending to owned ordered lists.

mod delete;
mod insert;
mod select;
mod update;

use serde::{Deserialize, Serialize};

pub use delete::Delete;
pub use insert::Insert;
pub use select::Select;
pub use update::Update;

/// Any compilable statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    pub fn record_type(&self) -> &str {
        match self {
            Self::Select(s) => &s.record_type,
            Self::Insert(s) => &s.record_type,
            Self::Update(s) => &s.record_type,
            Self::Delete(s) => &s.record_type,
        }
    }
}

impl From<Select> for Statement {
    fn from(s: Select) -> Self {
        Self::Select(s)
    }
}

impl From<Insert> for Statement {
    fn from(s: Insert) -> Self {
        Self::Insert(s)
    }
}

impl From<Update> for Statement {
    fn from(s: Update) -> Self {
        Self::Update(s)
    }
}

impl From<Delete> for Statement {
    fn from(s: Delete) -> Self {
        Self::Delete(s)
    }
}
