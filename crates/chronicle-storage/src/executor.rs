//! `IStatementExecutor` over a borrowed `rusqlite::Connection`.
//!
//! This is what runs inside [`SqliteSession::transaction`](crate::SqliteSession::transaction):
//! the closure receives a [`ConnectionExecutor`] over the writer.

use rusqlite::Connection;
use tracing::debug;

use chronicle_core::errors::ExecutionError;
use chronicle_core::models::{ColumnKind, TableSchema, TemporalRecord, Value};
use chronicle_core::traits::{random_identities, IStatementExecutor};

use crate::decode::decode_row;
use crate::to_execution_err;

/// Prepare `sql`, run it, and decode every row against `shape`.
pub fn query_records(
    conn: &Connection,
    sql: &str,
    shape: &TableSchema,
) -> Result<Vec<TemporalRecord>, ExecutionError> {
    let mut stmt = conn.prepare(sql).map_err(to_execution_err)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let mut rows = stmt.query([]).map_err(to_execution_err)?;

    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(to_execution_err)? {
        records.push(decode_row(row, &names, shape)?);
    }
    debug!(table = %shape.table, rows = records.len(), "query");
    Ok(records)
}

/// Run one write statement.
pub fn execute_statement(conn: &Connection, sql: &str) -> Result<usize, ExecutionError> {
    let affected = conn.execute(sql, []).map_err(to_execution_err)?;
    debug!(affected, "execute");
    Ok(affected)
}

/// `count` identities no row of `shape`'s table uses.
///
/// Integer identities continue past the table's current maximum; other
/// kinds get random UUIDs. Two sessions allocating at once can collide
/// unless both run inside a write transaction.
pub fn allocate_identities(
    conn: &Connection,
    shape: &TableSchema,
    count: usize,
) -> Result<Vec<Value>, ExecutionError> {
    if shape.identity_kind != ColumnKind::Integer {
        return random_identities(shape, count);
    }

    let sql = format!(
        "SELECT COALESCE(MAX({}), 0) FROM {}",
        shape.temporal.identity, shape.table
    );
    let max: i64 = conn
        .query_row(&sql, [], |row| row.get(0))
        .map_err(to_execution_err)?;

    let identities = (1..=count as i64)
        .map(|offset| max.checked_add(offset).map(Value::Int))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ExecutionError::IdentityAllocation {
            table: shape.table.clone(),
            message: format!("{count} identities past {max} overflow i64"),
        })?;
    debug!(table = %shape.table, count, first = max.saturating_add(1), "allocated identities");
    Ok(identities)
}

/// A borrowed connection used as a statement executor.
#[derive(Clone, Copy)]
pub struct ConnectionExecutor<'c> {
    conn: &'c Connection,
}

impl<'c> ConnectionExecutor<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// The underlying connection, for statements outside the executor API.
    pub fn connection(&self) -> &'c Connection {
        self.conn
    }
}

impl IStatementExecutor for ConnectionExecutor<'_> {
    fn query(&self, sql: &str, shape: &TableSchema) -> Result<Vec<TemporalRecord>, ExecutionError> {
        query_records(self.conn, sql, shape)
    }

    fn execute(&self, sql: &str) -> Result<usize, ExecutionError> {
        execute_statement(self.conn, sql)
    }

    fn allocate_identities(
        &self,
        shape: &TableSchema,
        count: usize,
    ) -> Result<Vec<Value>, ExecutionError> {
        allocate_identities(self.conn, shape, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_surface_as_sqlite_errors() {
        let conn = Connection::open_in_memory().unwrap();
        let err = ConnectionExecutor::new(&conn)
            .execute("DELETE FRM nowhere")
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Sqlite { .. }));
    }

    #[test]
    fn integer_identities_continue_past_the_maximum() {
        let conn = Connection::open_in_memory().unwrap();
        let shape = TableSchema::new("t", ColumnKind::Integer);
        conn.execute_batch("CREATE TABLE t (id INTEGER)").unwrap();
        let executor = ConnectionExecutor::new(&conn);

        assert_eq!(
            executor.allocate_identities(&shape, 2).unwrap(),
            vec![Value::Int(1), Value::Int(2)]
        );
        conn.execute_batch("INSERT INTO t (id) VALUES (7), (3)").unwrap();
        assert_eq!(
            executor.allocate_identities(&shape, 2).unwrap(),
            vec![Value::Int(8), Value::Int(9)]
        );
        assert!(executor.allocate_identities(&shape, 0).unwrap().is_empty());
    }
}
