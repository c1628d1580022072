//! Mutation plans and their reports.

pub mod report;
pub mod scoped_delete;
pub mod versioned_insert;

pub use report::{MutationReport, MutationStep, StepKind};
pub use scoped_delete::ValidWindow;

use tracing::{debug, warn};

use chronicle_core::errors::ChronicleResult;
use chronicle_core::models::{TableSchema, TemporalRecord};
use chronicle_core::traits::IStatementExecutor;

/// Run one write step and record it. A failure aborts the plan: the error
/// is returned and nothing already applied is undone.
pub(crate) fn run_write<E: IStatementExecutor>(
    executor: &E,
    report: &mut MutationReport,
    kind: StepKind,
    sql: String,
) -> ChronicleResult<usize> {
    let rows = executor.execute(&sql).map_err(|e| {
        warn!(step = ?kind, error = %e, "mutation step failed, aborting plan");
        e
    })?;
    debug!(step = ?kind, rows, %sql, "mutation step");
    report.record(kind, sql, rows);
    Ok(rows)
}

/// Run one read step and record it.
pub(crate) fn run_read<E: IStatementExecutor>(
    executor: &E,
    report: &mut MutationReport,
    kind: StepKind,
    sql: String,
    shape: &TableSchema,
) -> ChronicleResult<Vec<TemporalRecord>> {
    let records = executor.query(&sql, shape).map_err(|e| {
        warn!(step = ?kind, error = %e, "mutation read failed, aborting plan");
        e
    })?;
    debug!(step = ?kind, rows = records.len(), %sql, "mutation read");
    report.record(kind, sql, records.len());
    Ok(records)
}

/// Rows per multi-row INSERT for `len` pending rows. 0 in config means unlimited.
pub(crate) fn batch_size(configured: usize, len: usize) -> usize {
    if configured == 0 {
        len.max(1)
    } else {
        configured
    }
}
