//! A single physical row of a logically versioned entity.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{SystemPeriod, TemporalColumns, ValidPeriod, Value};

/// One physical row: an identity, its two periods, and ordered payload fields.
///
/// `(identity, valid_time.start)` is the version key. At most one row per
/// identity has an open system period at any instant; the mutation engine
/// keeps that true, storage does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalRecord {
    pub identity: Value,
    pub valid_time: ValidPeriod,
    pub system_time: SystemPeriod,
    pub fields: IndexMap<String, Value>,
}

impl TemporalRecord {
    pub fn new(identity: impl Into<Value>, valid_time: ValidPeriod, system_time: SystemPeriod) -> Self {
        Self {
            identity: identity.into(),
            valid_time,
            system_time,
            fields: IndexMap::new(),
        }
    }

    /// Append (or replace) a payload field, keeping first-insertion order.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether this row is the open version of its identity.
    pub fn is_current(&self) -> bool {
        self.system_time.is_current()
    }

    /// Flatten into an ordered column map: identity, valid period, system
    /// period, then payload fields in their own order.
    pub fn to_row(&self, columns: &TemporalColumns) -> IndexMap<String, Value> {
        let mut row = IndexMap::with_capacity(self.fields.len() + 5);
        row.insert(columns.identity.clone(), self.identity.clone());
        row.insert(columns.valid_time_start.clone(), Value::Date(self.valid_time.start));
        row.insert(columns.valid_time_end.clone(), Value::Date(self.valid_time.end));
        row.insert(columns.system_time_start.clone(), Value::Timestamp(self.system_time.start));
        row.insert(columns.system_time_end.clone(), Value::Timestamp(self.system_time.end));
        for (name, value) in &self.fields {
            row.insert(name.clone(), value.clone());
        }
        row
    }
}
