//! System-time (audit) relations.

use chronicle_core::errors::CompileResult;
use chronicle_core::models::{IntervalColumns, Value};

use crate::predicate::Predicate;

/// Versions recorded and superseded within `[start, end]`, inclusive both
/// sides: `S2 >= start AND E2 <= end`.
pub fn between(
    columns: &IntervalColumns,
    start: impl Into<Value>,
    end: impl Into<Value>,
) -> CompileResult<Predicate> {
    Ok(Predicate::and([
        Predicate::ge(&columns.start, start)?,
        Predicate::le(&columns.end, end)?,
    ]))
}

/// The version that was current at `instant`: `S2 <= t AND E2 > t`.
pub fn as_of(columns: &IntervalColumns, instant: impl Into<Value>) -> CompileResult<Predicate> {
    let instant = instant.into();
    Ok(Predicate::and([
        Predicate::le(&columns.start, instant.clone())?,
        Predicate::gt(&columns.end, instant)?,
    ]))
}

/// Inclusive start, exclusive end: `S2 >= start AND E2 < end`.
pub fn from(
    columns: &IntervalColumns,
    start: impl Into<Value>,
    end: impl Into<Value>,
) -> CompileResult<Predicate> {
    Ok(Predicate::and([
        Predicate::ge(&columns.start, start)?,
        Predicate::lt(&columns.end, end)?,
    ]))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn cols() -> IntervalColumns {
        IntervalColumns::new("system_time_start", "system_time_end")
    }

    fn t(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 3, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn between_is_inclusive() {
        assert_eq!(
            between(&cols(), t(1), t(2)).unwrap().render().unwrap(),
            "(system_time_start >= '2020-03-01 01:00:00.000000' \
             AND system_time_end <= '2020-03-01 02:00:00.000000')"
        );
    }

    #[test]
    fn as_of_uses_open_end() {
        assert_eq!(
            as_of(&cols(), t(9)).unwrap().render().unwrap(),
            "(system_time_start <= '2020-03-01 09:00:00.000000' \
             AND system_time_end > '2020-03-01 09:00:00.000000')"
        );
    }

    #[test]
    fn from_excludes_end() {
        assert_eq!(
            from(&cols(), t(1), t(2)).unwrap().render().unwrap(),
            "(system_time_start >= '2020-03-01 01:00:00.000000' \
             AND system_time_end < '2020-03-01 02:00:00.000000')"
        );
    }
}
