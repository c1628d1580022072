//! Table shape as resolved by the schema collaborator.

use serde::{Deserialize, Serialize};

/// Storage kind of a column, used to decode rows read back from a collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Integer,
    Decimal,
    Text,
    Char,
    Uuid,
    Date,
    Timestamp,
}

/// A payload column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ColumnKind,
}

/// The pair of columns that store one time dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalColumns {
    pub start: String,
    pub end: String,
}

impl IntervalColumns {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Names of the identity and the four bitemporal columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalColumns {
    pub identity: String,
    pub valid_time_start: String,
    pub valid_time_end: String,
    pub system_time_start: String,
    pub system_time_end: String,
}

impl Default for TemporalColumns {
    fn default() -> Self {
        Self {
            identity: "id".to_string(),
            valid_time_start: "valid_time_start".to_string(),
            valid_time_end: "valid_time_end".to_string(),
            system_time_start: "system_time_start".to_string(),
            system_time_end: "system_time_end".to_string(),
        }
    }
}

impl TemporalColumns {
    pub fn valid_time(&self) -> IntervalColumns {
        IntervalColumns::new(&self.valid_time_start, &self.valid_time_end)
    }

    pub fn system_time(&self) -> IntervalColumns {
        IntervalColumns::new(&self.system_time_start, &self.system_time_end)
    }

    /// The five column names in canonical order.
    pub fn names(&self) -> [&str; 5] {
        [
            self.identity.as_str(),
            self.valid_time_start.as_str(),
            self.valid_time_end.as_str(),
            self.system_time_start.as_str(),
            self.system_time_end.as_str(),
        ]
    }
}

/// Resolved table metadata for one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table: String,
    pub identity_kind: ColumnKind,
    pub temporal: TemporalColumns,
    pub payload: Vec<ColumnDef>,
}

impl TableSchema {
    /// A table with default temporal column names and no payload columns.
    pub fn new(table: impl Into<String>, identity_kind: ColumnKind) -> Self {
        Self {
            table: table.into(),
            identity_kind,
            temporal: TemporalColumns::default(),
            payload: Vec::new(),
        }
    }

    pub fn with_temporal(mut self, temporal: TemporalColumns) -> Self {
        self.temporal = temporal;
        self
    }

    pub fn with_column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.payload.push(ColumnDef {
            name: name.into(),
            kind,
        });
        self
    }

    /// Canonical column order: identity, valid period, system period, payload.
    pub fn columns(&self) -> Vec<String> {
        self.temporal
            .names()
            .iter()
            .map(|s| s.to_string())
            .chain(self.payload.iter().map(|c| c.name.clone()))
            .collect()
    }

    /// Storage kind of any column of this table.
    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        let t = &self.temporal;
        if name == t.identity {
            Some(self.identity_kind)
        } else if name == t.valid_time_start || name == t.valid_time_end {
            Some(ColumnKind::Date)
        } else if name == t.system_time_start || name == t.system_time_end {
            Some(ColumnKind::Timestamp)
        } else {
            self.payload.iter().find(|c| c.name == name).map(|c| c.kind)
        }
    }
}
