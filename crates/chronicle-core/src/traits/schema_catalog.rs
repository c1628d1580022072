use std::sync::Arc;

use crate::models::TableSchema;

/// Schema/metadata collaborator.
///
/// Resolves a logical record type to its table and column layout. The core
/// never hard-codes table or column names; it asks once per statement.
pub trait ISchemaCatalog: Send + Sync {
    fn resolve(&self, record_type: &str) -> Option<TableSchema>;
}

impl<T: ISchemaCatalog + ?Sized> ISchemaCatalog for &T {
    fn resolve(&self, record_type: &str) -> Option<TableSchema> {
        (**self).resolve(record_type)
    }
}

impl<T: ISchemaCatalog + ?Sized> ISchemaCatalog for Arc<T> {
    fn resolve(&self, record_type: &str) -> Option<TableSchema> {
        (**self).resolve(record_type)
    }
}
