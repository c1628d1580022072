//! Valid-time relations between a stored interval and query bounds.
//!
//! The formulas are fixed; the rendered text is part of the contract, so do
//! not replace any of them with a logically equivalent shape.

use chronicle_core::errors::CompileResult;
use chronicle_core::models::{IntervalColumns, Value};

use crate::predicate::Predicate;

/// Stored interval lies within `[start, end]`: `S2 >= S1 AND E2 <= E1`.
pub fn contains(
    columns: &IntervalColumns,
    start: impl Into<Value>,
    end: impl Into<Value>,
) -> CompileResult<Predicate> {
    Ok(Predicate::and([
        Predicate::ge(&columns.start, start)?,
        Predicate::le(&columns.end, end)?,
    ]))
}

/// `S2 = S1 AND E2 = E1`.
pub fn equals(
    columns: &IntervalColumns,
    start: impl Into<Value>,
    end: impl Into<Value>,
) -> CompileResult<Predicate> {
    Ok(Predicate::and([
        Predicate::eq(&columns.start, start)?,
        Predicate::eq(&columns.end, end)?,
    ]))
}

/// `E2 <= S1`. One-sided: the stored start is not constrained.
pub fn precedes(columns: &IntervalColumns, start: impl Into<Value>) -> CompileResult<Predicate> {
    Predicate::le(&columns.end, start)
}

/// `E2 = S1`.
pub fn immediately_precedes(
    columns: &IntervalColumns,
    start: impl Into<Value>,
) -> CompileResult<Predicate> {
    Predicate::eq(&columns.end, start)
}

/// `S2 >= E1`.
pub fn succeeds(columns: &IntervalColumns, end: impl Into<Value>) -> CompileResult<Predicate> {
    Predicate::ge(&columns.start, end)
}

/// `S2 = E1`.
pub fn immediately_succeeds(
    columns: &IntervalColumns,
    end: impl Into<Value>,
) -> CompileResult<Predicate> {
    Predicate::eq(&columns.start, end)
}

/// Stored interval shares time with `[start, end]`.
///
/// ```text
///    (S2 > S1 AND NOT (S2 >= E1 AND E2 >= E1))
/// OR (S2 < S1 AND NOT (E2 <= S1 AND E2 <= E1))
/// OR (S2 = S1 AND (E2 = E1 OR E2 <> E1))
/// ```
///
/// For well-formed intervals this selects `S1 < S2 < E1`, `S2 < S1 < E2`,
/// or `S2 = S1`; intervals that merely touch an edge are excluded.
pub fn overlaps(
    columns: &IntervalColumns,
    start: impl Into<Value>,
    end: impl Into<Value>,
) -> CompileResult<Predicate> {
    let (s1, e1) = (start.into(), end.into());
    let (s2, e2) = (columns.start.as_str(), columns.end.as_str());

    let starts_inside = Predicate::and([
        Predicate::gt(s2, s1.clone())?,
        Predicate::not(Predicate::and([
            Predicate::ge(s2, e1.clone())?,
            Predicate::ge(e2, e1.clone())?,
        ])),
    ]);
    let starts_before = Predicate::and([
        Predicate::lt(s2, s1.clone())?,
        Predicate::not(Predicate::and([
            Predicate::le(e2, s1.clone())?,
            Predicate::le(e2, e1.clone())?,
        ])),
    ]);
    let starts_together = Predicate::and([
        Predicate::eq(s2, s1)?,
        Predicate::or([Predicate::eq(e2, e1.clone())?, Predicate::ne(e2, e1)?]),
    ]);

    Ok(Predicate::or([starts_inside, starts_before, starts_together]))
}
