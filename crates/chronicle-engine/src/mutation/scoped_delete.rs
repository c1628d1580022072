//! Valid-time-scoped delete.
//!
//! Without a window every row matching the filter `F` is deleted. With a
//! window `[ws, we)` the plan is:
//!
//! 1. read `ALL`, the rows matching `F`
//! 2. read `OVERLAPPING`, the rows matching `F AND overlaps(ws, we)`
//! 3. delete `F AND NOT overlaps(ws, we)` when `ALL` holds rows outside the window
//! 4. when `OVERLAPPING` is non-empty:
//!    - truncate `F AND identity IN ids(OVERLAPPING)` to end at `ws`, one
//!      statement per `identity_chunk_size` identities
//!    - re-insert `[we, original end]` for rows that ran past `we`, each under
//!      a freshly allocated identity
//!    - delete `F AND overlaps(ws, we)`, which now only matches the enclosed slice
//!
//! Step 3 deletes history that lies wholly outside the window. That is the
//! observed behavior of this protocol and is kept as is. It runs before the
//! truncation so that the remainders from step 4 survive it.
//!
//! A right remainder is a separate entity from its left side: it gets a new
//! identity so each identity keeps at most one open row.

use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use chronicle_core::config::EngineConfig;
use chronicle_core::errors::{ChronicleError, ChronicleResult, ExecutionError};
use chronicle_core::models::{TableSchema, TemporalRecord, ValidPeriod, Value};
use chronicle_core::traits::{ISchemaCatalog, IStatementExecutor};
use chronicle_query::temporal::valid_time;
use chronicle_query::{Delete, Insert, Predicate, Select, StatementCompiler, Update};

use super::{batch_size, run_read, run_write, MutationReport, StepKind};

/// A valid-time window `[start, end)` to delete from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ValidWindow {
    /// Build a window, rejecting `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ChronicleResult<Self> {
        if start >= end {
            return Err(ChronicleError::InvalidTemporalBounds(format!(
                "window start ({start}) must be before window end ({end})"
            )));
        }
        Ok(Self { start, end })
    }
}

pub fn delete_scoped<E, C>(
    executor: &E,
    compiler: &StatementCompiler<C>,
    config: &EngineConfig,
    record_type: &str,
    filters: &[Predicate],
    window: Option<ValidWindow>,
) -> ChronicleResult<MutationReport>
where
    E: IStatementExecutor,
    C: ISchemaCatalog,
{
    let schema = compiler.schema_for(record_type)?;
    let mut report = MutationReport::default();

    let Some(window) = window else {
        let delete = Delete::new(record_type).filters(filters.iter().cloned());
        run_write(
            executor,
            &mut report,
            StepKind::DeleteUnwindowed,
            compiler.compile_delete(&delete)?,
        )?;
        info!(record_type, rows = report.rows_written(), "delete applied");
        return Ok(report);
    };

    let t = &schema.temporal;
    let overlap = valid_time::overlaps(&t.valid_time(), window.start, window.end)?;
    let with_overlap = || filters.iter().cloned().chain([overlap.clone()]);

    let all = run_read(
        executor,
        &mut report,
        StepKind::ReadAll,
        compiler.compile_select(&Select::new(record_type).filters(filters.iter().cloned()))?,
        &schema,
    )?;
    let overlapping = run_read(
        executor,
        &mut report,
        StepKind::ReadOverlapping,
        compiler.compile_select(&Select::new(record_type).filters(with_overlap()))?,
        &schema,
    )?;

    if all.len() > overlapping.len() {
        warn!(
            record_type,
            rows = all.len() - overlapping.len(),
            "deleting matched rows outside the valid-time window"
        );
        let outside = Delete::new(record_type)
            .filters(filters.iter().cloned())
            .filter(Predicate::not(overlap.clone()));
        run_write(
            executor,
            &mut report,
            StepKind::DeleteOutsideWindow,
            compiler.compile_delete(&outside)?,
        )?;
    }

    if !overlapping.is_empty() {
        let ids: Vec<Value> = overlapping
            .iter()
            .map(|r| r.identity.clone())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();
        for chunk in ids.chunks(batch_size(config.identity_chunk_size, ids.len())) {
            let truncate = Update::new(record_type)
                .set(&t.valid_time_end, window.start)
                .filters(filters.iter().cloned())
                .filter(Predicate::any_of(&t.identity, chunk.iter().cloned())?);
            run_write(
                executor,
                &mut report,
                StepKind::TruncateToWindowStart,
                compiler.compile_update(&truncate)?,
            )?;
        }

        let mut remainders = right_remainders(&overlapping, window);
        assign_fresh_identities(executor, &schema, &mut remainders)?;
        let size = batch_size(config.insert_batch_size, remainders.len());
        for batch in remainders.chunks(size) {
            let insert = Insert::new(record_type).records(batch, t);
            run_write(
                executor,
                &mut report,
                StepKind::InsertRightRemainders,
                compiler.compile_insert(&insert)?,
            )?;
        }

        let slice = Delete::new(record_type).filters(with_overlap());
        run_write(
            executor,
            &mut report,
            StepKind::DeleteWindowSlice,
            compiler.compile_delete(&slice)?,
        )?;
    }

    info!(
        record_type,
        window_start = %window.start,
        window_end = %window.end,
        matched = all.len(),
        overlapping = overlapping.len(),
        rows = report.rows_written(),
        "scoped delete applied"
    );
    Ok(report)
}

/// The part of each row past the window end, as `[window.end, original end]`
/// with the row's system period and payload. The identity is still the
/// source row's until [`assign_fresh_identities`] replaces it.
pub(crate) fn right_remainders(rows: &[TemporalRecord], window: ValidWindow) -> Vec<TemporalRecord> {
    rows.iter()
        .filter(|r| r.valid_time.end > window.end)
        .map(|r| TemporalRecord {
            valid_time: ValidPeriod {
                start: window.end,
                end: r.valid_time.end,
            },
            ..r.clone()
        })
        .collect()
}

/// Give every remainder an identity no stored row uses.
fn assign_fresh_identities<E: IStatementExecutor>(
    executor: &E,
    schema: &TableSchema,
    remainders: &mut [TemporalRecord],
) -> ChronicleResult<()> {
    if remainders.is_empty() {
        return Ok(());
    }
    let fresh = executor.allocate_identities(schema, remainders.len())?;
    if fresh.len() != remainders.len() {
        return Err(ExecutionError::IdentityAllocation {
            table: schema.table.clone(),
            message: format!("asked for {}, got {}", remainders.len(), fresh.len()),
        }
        .into());
    }
    for (remainder, identity) in remainders.iter_mut().zip(fresh) {
        debug!(from = ?remainder.identity, to = ?identity, "right remainder identity");
        remainder.identity = identity;
    }
    Ok(())
}
