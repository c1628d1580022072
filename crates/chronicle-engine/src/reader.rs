//! Temporal read helpers: each compiles one `Select` with the relevant
//! temporal predicate and decodes rows against the table schema.

use chrono::NaiveDateTime;
use tracing::warn;

use chronicle_core::errors::ChronicleResult;
use chronicle_core::models::{open_timestamp, TemporalRecord, Value};
use chronicle_core::traits::{ISchemaCatalog, IStatementExecutor};
use chronicle_query::temporal::system_time;
use chronicle_query::{IntervalRelation, Predicate, Select, StatementCompiler, SystemTimeRelation};

pub struct TemporalReader<E, C> {
    executor: E,
    compiler: StatementCompiler<C>,
}

impl<E: IStatementExecutor, C: ISchemaCatalog> TemporalReader<E, C> {
    pub fn new(executor: E, compiler: StatementCompiler<C>) -> Self {
        Self { executor, compiler }
    }

    /// Rows matching `filters`, at most `limit` of them.
    pub fn find(
        &self,
        record_type: &str,
        filters: &[Predicate],
        limit: Option<i64>,
    ) -> ChronicleResult<Vec<TemporalRecord>> {
        let mut select = Select::new(record_type).filters(filters.iter().cloned());
        if let Some(limit) = limit {
            select = select.limit(limit);
        }
        self.run(&select)
    }

    /// The open version of `identity`, if any.
    pub fn current(
        &self,
        record_type: &str,
        identity: impl Into<Value>,
    ) -> ChronicleResult<Option<TemporalRecord>> {
        let t = self.compiler.schema_for(record_type)?.temporal;
        let select = Select::new(record_type)
            .filter(Predicate::eq(&t.identity, identity)?)
            .filter(Predicate::eq(&t.system_time_end, open_timestamp())?);

        let mut rows = self.run(&select)?;
        if rows.len() > 1 {
            warn!(record_type, open_versions = rows.len(), "identity has more than one open version");
        }
        Ok(if rows.is_empty() { None } else { Some(rows.swap_remove(0)) })
    }

    /// Rows matching `filters` that were the recorded belief at `instant`.
    pub fn as_of(
        &self,
        record_type: &str,
        filters: &[Predicate],
        instant: NaiveDateTime,
    ) -> ChronicleResult<Vec<TemporalRecord>> {
        let columns = self.compiler.schema_for(record_type)?.temporal.system_time();
        let select = Select::new(record_type)
            .filters(filters.iter().cloned())
            .filter(system_time::as_of(&columns, instant)?);
        self.run(&select)
    }

    /// Rows matching `filters` whose valid period stands in `relation`.
    pub fn valid_during(
        &self,
        record_type: &str,
        filters: &[Predicate],
        relation: &IntervalRelation,
    ) -> ChronicleResult<Vec<TemporalRecord>> {
        let columns = self.compiler.schema_for(record_type)?.temporal.valid_time();
        let select = Select::new(record_type)
            .filters(filters.iter().cloned())
            .filter(relation.to_predicate(&columns)?);
        self.run(&select)
    }

    /// Rows matching `filters` whose system period stands in `relation`.
    pub fn system_during(
        &self,
        record_type: &str,
        filters: &[Predicate],
        relation: &SystemTimeRelation,
    ) -> ChronicleResult<Vec<TemporalRecord>> {
        let columns = self.compiler.schema_for(record_type)?.temporal.system_time();
        let select = Select::new(record_type)
            .filters(filters.iter().cloned())
            .filter(relation.to_predicate(&columns)?);
        self.run(&select)
    }

    fn run(&self, select: &Select) -> ChronicleResult<Vec<TemporalRecord>> {
        let schema = self.compiler.schema_for(&select.record_type)?;
        let sql = self.compiler.compile_select(select)?;
        Ok(self.executor.query(&sql, &schema)?)
    }
}
