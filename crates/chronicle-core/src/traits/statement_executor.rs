use std::sync::Arc;

use uuid::Uuid;

use crate::errors::ExecutionError;
use crate::models::{ColumnKind, TableSchema, TemporalRecord, Value};

/// Read/execute collaborator, typically a database session.
///
/// Consumes compiled statement text. Implementations own connections and
/// transactions; the core owns neither. Each call is independent: a
/// multi-statement plan is only atomic if the caller wraps it in a
/// transaction on the implementation side.
///
/// No `Send + Sync` bound: an executor may borrow a connection that is
/// pinned to an open transaction.
pub trait IStatementExecutor {
    /// Run a SELECT and decode its rows using `shape` as the record-shape hint.
    fn query(&self, sql: &str, shape: &TableSchema) -> Result<Vec<TemporalRecord>, ExecutionError>;

    /// Run a write statement, returning the number of rows affected.
    fn execute(&self, sql: &str) -> Result<usize, ExecutionError>;

    /// Allocate `count` identities that no stored row of `shape`'s table uses.
    ///
    /// The default hands out random UUIDs for UUID and text identities.
    /// Integer identities need the store's view of the table, so stores
    /// with integer keys override this.
    fn allocate_identities(
        &self,
        shape: &TableSchema,
        count: usize,
    ) -> Result<Vec<Value>, ExecutionError> {
        random_identities(shape, count)
    }
}

/// `count` random v4 UUID identities, as UUIDs or as text depending on the
/// identity kind of `shape`.
pub fn random_identities(shape: &TableSchema, count: usize) -> Result<Vec<Value>, ExecutionError> {
    let make: fn() -> Value = match shape.identity_kind {
        ColumnKind::Uuid => || Value::Uuid(Uuid::new_v4()),
        ColumnKind::Text => || Value::Text(Uuid::new_v4().hyphenated().to_string()),
        kind => {
            return Err(ExecutionError::IdentityAllocation {
                table: shape.table.clone(),
                message: format!("no generator for {kind:?} identities"),
            })
        }
    };
    Ok((0..count).map(|_| make()).collect())
}

impl<T: IStatementExecutor + ?Sized> IStatementExecutor for &T {
    fn query(&self, sql: &str, shape: &TableSchema) -> Result<Vec<TemporalRecord>, ExecutionError> {
        (**self).query(sql, shape)
    }

    fn execute(&self, sql: &str) -> Result<usize, ExecutionError> {
        (**self).execute(sql)
    }

    fn allocate_identities(
        &self,
        shape: &TableSchema,
        count: usize,
    ) -> Result<Vec<Value>, ExecutionError> {
        (**self).allocate_identities(shape, count)
    }
}

impl<T: IStatementExecutor + ?Sized> IStatementExecutor for Arc<T> {
    fn query(&self, sql: &str, shape: &TableSchema) -> Result<Vec<TemporalRecord>, ExecutionError> {
        (**self).query(sql, shape)
    }

    fn execute(&self, sql: &str) -> Result<usize, ExecutionError> {
        (**self).execute(sql)
    }

    fn allocate_identities(
        &self,
        shape: &TableSchema,
        count: usize,
    ) -> Result<Vec<Value>, ExecutionError> {
        (**self).allocate_identities(shape, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_identities_follow_the_identity_kind() {
        let uuids = random_identities(&TableSchema::new("t", ColumnKind::Uuid), 3).unwrap();
        assert_eq!(uuids.len(), 3);
        assert!(uuids.iter().all(|v| matches!(v, Value::Uuid(_))));
        assert_ne!(uuids[0], uuids[1]);

        let texts = random_identities(&TableSchema::new("t", ColumnKind::Text), 1).unwrap();
        assert!(matches!(&texts[0], Value::Text(s) if s.len() == 36));
    }

    #[test]
    fn integer_identities_need_the_store() {
        let err = random_identities(&TableSchema::new("trades", ColumnKind::Integer), 1).unwrap_err();
        assert!(matches!(err, ExecutionError::IdentityAllocation { ref table, .. } if table == "trades"));
    }
}
