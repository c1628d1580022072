use serde::{Deserialize, Serialize};

use crate::predicate::Predicate;

/// `DELETE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub record_type: String,
    pub predicates: Vec<Predicate>,
}

impl Delete {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            predicates: Vec::new(),
        }
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
