use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use chronicle_core::models::{TemporalColumns, TemporalRecord, Value};

/// Multi-row `INSERT`. The first row decides the column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub record_type: String,
    pub rows: Vec<IndexMap<String, Value>>,
}

impl Insert {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, row: IndexMap<String, Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Append a record flattened with the given temporal column names.
    pub fn record(self, record: &TemporalRecord, columns: &TemporalColumns) -> Self {
        self.row(record.to_row(columns))
    }

    pub fn records<'a>(
        mut self,
        records: impl IntoIterator<Item = &'a TemporalRecord>,
        columns: &TemporalColumns,
    ) -> Self {
        self.rows.extend(records.into_iter().map(|r| r.to_row(columns)));
        self
    }
}
