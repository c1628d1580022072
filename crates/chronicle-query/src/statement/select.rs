use serde::{Deserialize, Serialize};

use crate::predicate::Predicate;

/// `SELECT`. No columns means `*`; a negative limit means no limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub record_type: String,
    pub columns: Vec<String>,
    pub predicates: Vec<Predicate>,
    pub limit: Option<i64>,
}

impl Select {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            columns: Vec::new(),
            predicates: Vec::new(),
            limit: None,
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns.extend(columns.into_iter().map(Into::into));
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

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
