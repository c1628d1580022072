//! What a mutation plan did, step by step.

use serde::{Deserialize, Serialize};

/// The role of one statement within a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Versioned insert: look up the identity's open version.
    ReadOpenVersion,
    /// Versioned insert: set the open version's system-time end to now.
    CloseOpenVersion,
    /// Versioned insert: the multi-row INSERT of new versions.
    InsertVersions,
    /// Delete without a window: every row matching the filter.
    DeleteUnwindowed,
    /// Scoped delete: rows matching the filter.
    ReadAll,
    /// Scoped delete: rows matching the filter that overlap the window.
    ReadOverlapping,
    /// Scoped delete: matching rows that never touch the window.
    DeleteOutsideWindow,
    /// Scoped delete: cut overlapping rows back to the window start.
    TruncateToWindowStart,
    /// Scoped delete: re-insert the part of each row past the window end.
    InsertRightRemainders,
    /// Scoped delete: drop what still overlaps the window.
    DeleteWindowSlice,
}

impl StepKind {
    pub fn is_read(self) -> bool {
        matches!(
            self,
            Self::ReadOpenVersion | Self::ReadAll | Self::ReadOverlapping
        )
    }
}

/// One executed statement. `rows` is rows affected for writes and rows
/// returned for reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationStep {
    pub kind: StepKind,
    pub sql: String,
    pub rows: usize,
}

/// Ordered log of a plan's statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReport {
    pub steps: Vec<MutationStep>,
}

impl MutationReport {
    pub(crate) fn record(&mut self, kind: StepKind, sql: String, rows: usize) {
        self.steps.push(MutationStep { kind, sql, rows });
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Statement text in execution order.
    pub fn statements(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.sql.as_str()).collect()
    }

    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|s| s.kind).collect()
    }

    /// Total rows affected by write steps.
    pub fn rows_written(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| !s.kind.is_read())
            .map(|s| s.rows)
            .sum()
    }
}
