//! Versioned insert: close the identity's open version, then insert the new one.
//!
//! Process, per identity:
//! 1. read the row with `identity = v AND system_time_end = <sentinel>`
//! 2. if there is one, set its `system_time_end` to `now`, same scope
//! 3. insert the new version with its own system period
//!
//! Identities in one chunk share the INSERT. A batch that repeats an
//! identity is split so that each chunk holds it at most once.

use chrono::NaiveDateTime;
use indexmap::IndexSet;
use tracing::info;

use chronicle_core::config::EngineConfig;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::models::{open_timestamp, TemporalRecord, Value};
use chronicle_core::traits::{ISchemaCatalog, IStatementExecutor};
use chronicle_query::{Insert, Predicate, Select, StatementCompiler, Update};

use super::{batch_size, run_read, run_write, MutationReport, StepKind};

pub fn insert_versioned<E, C>(
    executor: &E,
    compiler: &StatementCompiler<C>,
    config: &EngineConfig,
    now: NaiveDateTime,
    record_type: &str,
    records: &[TemporalRecord],
) -> ChronicleResult<MutationReport>
where
    E: IStatementExecutor,
    C: ISchemaCatalog,
{
    let schema = compiler.schema_for(record_type)?;
    let t = &schema.temporal;
    let mut report = MutationReport::default();

    for chunk in distinct_identity_chunks(records) {
        for record in &chunk {
            let scope = [
                Predicate::eq(&t.identity, record.identity.clone())?,
                Predicate::eq(&t.system_time_end, open_timestamp())?,
            ];

            let select = Select::new(record_type).filters(scope.iter().cloned());
            let open = run_read(
                executor,
                &mut report,
                StepKind::ReadOpenVersion,
                compiler.compile_select(&select)?,
                &schema,
            )?;

            if !open.is_empty() {
                let close = Update::new(record_type)
                    .set(&t.system_time_end, now)
                    .filters(scope);
                run_write(
                    executor,
                    &mut report,
                    StepKind::CloseOpenVersion,
                    compiler.compile_update(&close)?,
                )?;
            }
        }

        for batch in chunk.chunks(batch_size(config.insert_batch_size, chunk.len())) {
            let insert = Insert::new(record_type).records(batch.iter().copied(), t);
            run_write(
                executor,
                &mut report,
                StepKind::InsertVersions,
                compiler.compile_insert(&insert)?,
            )?;
        }
    }

    info!(
        record_type,
        records = records.len(),
        statements = report.steps.len(),
        "versioned insert applied"
    );
    Ok(report)
}

/// Split `records` into consecutive runs with no repeated identity.
pub(crate) fn distinct_identity_chunks(records: &[TemporalRecord]) -> Vec<Vec<&TemporalRecord>> {
    let mut chunks = Vec::new();
    let mut current: Vec<&TemporalRecord> = Vec::new();
    let mut seen: IndexSet<&Value> = IndexSet::new();

    for record in records {
        if !seen.insert(&record.identity) {
            chunks.push(std::mem::take(&mut current));
            seen.clear();
            seen.insert(&record.identity);
        }
        current.push(record);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use test_fixtures::trade;

    use super::*;

    #[test]
    fn repeated_identity_starts_a_new_chunk() {
        let records = vec![
            trade(1, 1, 31, "A"),
            trade(2, 1, 31, "B"),
            trade(1, 5, 31, "A2"),
            trade(3, 1, 31, "C"),
        ];
        let sizes: Vec<usize> = distinct_identity_chunks(&records)
            .iter()
            .map(Vec::len)
            .collect();
        assert_eq!(sizes, vec![2, 2]);
    }

    #[test]
    fn empty_batch_has_no_chunks() {
        assert!(distinct_identity_chunks(&[]).is_empty());
    }
}
