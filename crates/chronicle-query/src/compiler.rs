//! Statement compiler: statement model + resolved table → statement text.
//!
//! Output grammar (keyword casing and whitespace are fixed):
//!
//! ```text
//! SELECT <cols|*> FROM <table>[ WHERE p1 AND p2 ...][ LIMIT n]
//! INSERT INTO <table> (<cols>) VALUES (<row1>), (<row2>) ...
//! UPDATE <table> SET c1 = v1, c2 = v2[ WHERE p1 AND p2 ...]
//! DELETE FROM <table>[ WHERE p1 AND p2 ...]
//! ```

use tracing::trace;

use chronicle_core::config::CompilerConfig;
use chronicle_core::errors::{CompileError, CompileResult};
use chronicle_core::models::TableSchema;
use chronicle_core::traits::ISchemaCatalog;

use crate::literal::format_literal_with;
use crate::predicate::{render_conjunction_with, Predicate};
use crate::statement::{Delete, Insert, Select, Statement, Update};

/// Compiles statements against a schema catalog.
#[derive(Debug, Clone)]
pub struct StatementCompiler<C> {
    catalog: C,
    config: CompilerConfig,
}

impl<C: ISchemaCatalog> StatementCompiler<C> {
    pub fn new(catalog: C, config: CompilerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Resolve a record type, failing with `UnknownTable`.
    pub fn schema_for(&self, record_type: &str) -> CompileResult<TableSchema> {
        self.catalog
            .resolve(record_type)
            .ok_or_else(|| CompileError::UnknownTable {
                record_type: record_type.to_string(),
            })
    }

    pub fn compile(&self, statement: &Statement) -> CompileResult<String> {
        let table = self.schema_for(statement.record_type())?.table;
        let config = &self.config;
        let sql = match statement {
            Statement::Select(s) => select_sql(&table, s, config)?,
            Statement::Insert(s) => insert_sql(&table, s, config)?,
            Statement::Update(s) => update_sql(&table, s, config)?,
            Statement::Delete(s) => delete_sql(&table, s, config)?,
        };
        trace!(record_type = statement.record_type(), %sql, "compiled statement");
        Ok(sql)
    }

    pub fn compile_select(&self, select: &Select) -> CompileResult<String> {
        select_sql(&self.schema_for(&select.record_type)?.table, select, &self.config)
    }

    pub fn compile_insert(&self, insert: &Insert) -> CompileResult<String> {
        insert_sql(&self.schema_for(&insert.record_type)?.table, insert, &self.config)
    }

    pub fn compile_update(&self, update: &Update) -> CompileResult<String> {
        update_sql(&self.schema_for(&update.record_type)?.table, update, &self.config)
    }

    pub fn compile_delete(&self, delete: &Delete) -> CompileResult<String> {
        delete_sql(&self.schema_for(&delete.record_type)?.table, delete, &self.config)
    }
}

/// Render a SELECT against an already-resolved table name.
pub fn select_sql(table: &str, select: &Select, config: &CompilerConfig) -> CompileResult<String> {
    let columns = if select.columns.is_empty() {
        "*".to_string()
    } else {
        select.columns.join(", ")
    };

    let mut sql = format!("SELECT {columns} FROM {table}");
    push_where(&mut sql, &select.predicates, config)?;
    if let Some(limit) = select.limit.filter(|n| *n >= 0) {
        sql.push_str(&format!(" LIMIT {limit}"));
    }
    Ok(sql)
}

/// Render a multi-row INSERT against an already-resolved table name.
///
/// Columns come from the first row. With `strict_insert_rows` set, every
/// other row must carry the same column names in the same order.
pub fn insert_sql(table: &str, insert: &Insert, config: &CompilerConfig) -> CompileResult<String> {
    let first = insert
        .rows
        .first()
        .ok_or_else(|| CompileError::InvalidArgument("insert requires at least one row".into()))?;
    if first.is_empty() {
        return Err(CompileError::InvalidArgument(
            "insert row must have at least one column".into(),
        ));
    }

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut tuples = Vec::with_capacity(insert.rows.len());
    for (index, row) in insert.rows.iter().enumerate() {
        if config.strict_insert_rows && !row.keys().map(String::as_str).eq(columns.iter().copied()) {
            return Err(CompileError::HeterogeneousRows {
                row: index,
                expected: columns.join(", "),
                found: row.keys().map(String::as_str).collect::<Vec<_>>().join(", "),
            });
        }
        let values = row
            .values()
            .map(|v| format_literal_with(v, config.decimal_literals))
            .collect::<CompileResult<Vec<_>>>()?;
        tuples.push(format!("({})", values.join(", ")));
    }

    Ok(format!(
        "INSERT INTO {table} ({}) VALUES {}",
        columns.join(", "),
        tuples.join(", ")
    ))
}

/// Render an UPDATE against an already-resolved table name.
///
/// An empty predicate list yields an unconditional update; that is the
/// caller's responsibility.
pub fn update_sql(table: &str, update: &Update, config: &CompilerConfig) -> CompileResult<String> {
    if update.assignments.is_empty() {
        return Err(CompileError::InvalidArgument(
            "update requires at least one assignment".into(),
        ));
    }

    let assignments = update
        .assignments
        .iter()
        .map(|(column, value)| {
            let literal = format_literal_with(value, config.decimal_literals)?;
            Ok(format!("{column} = {literal}"))
        })
        .collect::<CompileResult<Vec<_>>>()?;

    let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));
    push_where(&mut sql, &update.predicates, config)?;
    Ok(sql)
}

/// Render a DELETE against an already-resolved table name.
pub fn delete_sql(table: &str, delete: &Delete, config: &CompilerConfig) -> CompileResult<String> {
    let mut sql = format!("DELETE FROM {table}");
    push_where(&mut sql, &delete.predicates, config)?;
    Ok(sql)
}

fn push_where(
    sql: &mut String,
    predicates: &[Predicate],
    config: &CompilerConfig,
) -> CompileResult<()> {
    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&render_conjunction_with(predicates, config.decimal_literals)?);
    }
    Ok(())
}
