//! MutationEngine: the entry point for bitemporal write plans.

use chrono::{NaiveDateTime, SubsecRound, Utc};

use chronicle_core::config::{ChronicleConfig, EngineConfig};
use chronicle_core::errors::ChronicleResult;
use chronicle_core::models::TemporalRecord;
use chronicle_core::traits::{ISchemaCatalog, IStatementExecutor};
use chronicle_query::{Predicate, StatementCompiler};

use crate::mutation::{scoped_delete, versioned_insert, MutationReport, ValidWindow};
use crate::reader::TemporalReader;

/// Current UTC instant truncated to microseconds, the precision timestamps
/// are rendered with.
pub fn system_now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// Runs versioned inserts and scoped deletes against an executor.
///
/// Holds the executor, the compiler (and through it the schema catalog), and
/// a clock used to close open versions. Each step is a separate executor
/// call; wrap the plan in a transaction with [`bind`](Self::bind) when it
/// must be atomic.
pub struct MutationEngine<E, C> {
    executor: E,
    compiler: StatementCompiler<C>,
    config: EngineConfig,
    clock: fn() -> NaiveDateTime,
}

impl<E: IStatementExecutor, C: ISchemaCatalog> MutationEngine<E, C> {
    pub fn new(executor: E, compiler: StatementCompiler<C>, config: EngineConfig) -> Self {
        Self {
            executor,
            compiler,
            config,
            clock: system_now,
        }
    }

    /// Build from the top-level config: compiler and engine sections.
    pub fn from_config(executor: E, catalog: C, config: &ChronicleConfig) -> Self {
        Self::new(
            executor,
            StatementCompiler::new(catalog, config.compiler.clone()),
            config.engine.clone(),
        )
    }

    /// Replace the clock used for closing open versions.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn compiler(&self) -> &StatementCompiler<C> {
        &self.compiler
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// An engine sharing this one's catalog, config and clock but issuing
    /// statements through `executor`, typically a connection inside an
    /// open transaction.
    pub fn bind<X: IStatementExecutor>(&self, executor: X) -> MutationEngine<X, &C> {
        MutationEngine {
            executor,
            compiler: StatementCompiler::new(self.compiler.catalog(), self.compiler.config().clone()),
            config: self.config.clone(),
            clock: self.clock,
        }
    }

    /// Read helpers over the same executor and catalog.
    pub fn reader(&self) -> TemporalReader<&E, &C> {
        TemporalReader::new(
            &self.executor,
            StatementCompiler::new(self.compiler.catalog(), self.compiler.config().clone()),
        )
    }

    /// Insert new versions, closing each identity's open version first.
    pub fn insert_versioned(
        &self,
        record_type: &str,
        records: &[TemporalRecord],
    ) -> ChronicleResult<MutationReport> {
        versioned_insert::insert_versioned(
            &self.executor,
            &self.compiler,
            &self.config,
            (self.clock)(),
            record_type,
            records,
        )
    }

    /// Delete every row matching `filters`, in every period.
    pub fn delete(&self, record_type: &str, filters: &[Predicate]) -> ChronicleResult<MutationReport> {
        scoped_delete::delete_scoped(
            &self.executor,
            &self.compiler,
            &self.config,
            record_type,
            filters,
            None,
        )
    }

    /// Delete the `window` slice of the valid-time history of rows matching
    /// `filters`, keeping the parts before and after it.
    ///
    /// Matched rows that lie wholly outside the window are deleted as well.
    pub fn delete_within(
        &self,
        record_type: &str,
        filters: &[Predicate],
        window: ValidWindow,
    ) -> ChronicleResult<MutationReport> {
        scoped_delete::delete_scoped(
            &self.executor,
            &self.compiler,
            &self.config,
            record_type,
            filters,
            Some(window),
        )
    }
}
