use serde::{Deserialize, Serialize};

use chronicle_core::models::Value;

use crate::predicate::Predicate;

/// `UPDATE`. Needs at least one assignment to compile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub record_type: String,
    pub assignments: Vec<(String, Value)>,
    pub predicates: Vec<Predicate>,
}

impl Update {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            assignments: Vec::new(),
            predicates: Vec::new(),
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.assignments.push((column.into(), value.into()));
        self
    }

    /// Add a top-level predicate, joined to the others with ` AND `.
    ///
    /// An empty `And`/`Or` group renders as empty text and leaves the
    /// statement malformed (`WHERE ` or a trailing ` AND `).
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn filters(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }
}
