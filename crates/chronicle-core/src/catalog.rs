//! In-memory schema catalog.

use indexmap::IndexMap;

use crate::models::TableSchema;
use crate::traits::ISchemaCatalog;

/// A fixed record-type → table mapping registered up front.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: IndexMap<String, TableSchema>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, record_type: impl Into<String>, schema: TableSchema) -> Self {
        self.tables.insert(record_type.into(), schema);
        self
    }

    pub fn record_types(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl ISchemaCatalog for StaticCatalog {
    fn resolve(&self, record_type: &str) -> Option<TableSchema> {
        self.tables.get(record_type).cloned()
    }
}
