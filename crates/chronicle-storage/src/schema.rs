//! Table bootstrap from a `TableSchema`.

use rusqlite::Connection;
use tracing::info;

use chronicle_core::errors::ExecutionError;
use chronicle_core::models::{ColumnKind, TableSchema};

use crate::to_execution_err;

/// SQLite column type for a column kind.
///
/// Dates and timestamps are stored as text in the literal formatter's layout,
/// so comparisons in compiled predicates order chronologically. Decimals are
/// stored as text too: a `NUMERIC` column would turn them into 64-bit floats.
pub fn sql_type(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Integer => "INTEGER",
        ColumnKind::Decimal | ColumnKind::Text | ColumnKind::Char | ColumnKind::Uuid => "TEXT",
        ColumnKind::Date | ColumnKind::Timestamp => "TEXT",
    }
}

/// `CREATE TABLE IF NOT EXISTS` text for a schema, plus its indexes.
pub fn create_table_sql(schema: &TableSchema) -> String {
    let t = &schema.temporal;
    let columns = schema
        .columns()
        .iter()
        .map(|name| {
            let kind = schema.column_kind(name).unwrap_or(ColumnKind::Text);
            let not_null = if schema.payload.iter().any(|c| c.name == *name) {
                ""
            } else {
                " NOT NULL"
            };
            format!("    {name} {}{not_null}", sql_type(kind))
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n{columns}\n);\n\
         CREATE INDEX IF NOT EXISTS idx_{table}_current ON {table}({id}, {se});\n\
         CREATE INDEX IF NOT EXISTS idx_{table}_valid ON {table}({vs}, {ve});\n",
        table = schema.table,
        id = t.identity,
        vs = t.valid_time_start,
        ve = t.valid_time_end,
        se = t.system_time_end,
    )
}

/// Create the table for `schema` if it does not exist yet.
pub fn ensure_table(conn: &Connection, schema: &TableSchema) -> Result<(), ExecutionError> {
    conn.execute_batch(&create_table_sql(schema))
        .map_err(to_execution_err)?;
    info!(table = %schema.table, "table ready");
    Ok(())
}
