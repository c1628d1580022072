//! Valid-time and system-time periods and their open-interval sentinels.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::errors::{ChronicleError, ChronicleResult};

/// Sentinel valid-time end meaning "still true": `9999-12-31`.
pub fn open_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

/// Sentinel system-time end meaning "current version": `9999-12-31 23:59:59`.
pub fn open_timestamp() -> NaiveDateTime {
    open_date()
        .and_hms_opt(23, 59, 59)
        .unwrap_or(NaiveDateTime::MAX)
}

/// The period during which a fact holds in the modeled world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ValidPeriod {
    /// Build a period, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ChronicleResult<Self> {
        if start > end {
            return Err(ChronicleError::InvalidTemporalBounds(format!(
                "valid_time_start ({start}) must be <= valid_time_end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// A period with no known end.
    pub fn open_from(start: NaiveDate) -> Self {
        Self {
            start,
            end: open_date(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end == open_date()
    }
}

/// The period during which a row was the system's recorded belief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SystemPeriod {
    /// Build a period, rejecting `start >= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> ChronicleResult<Self> {
        if start >= end {
            return Err(ChronicleError::InvalidTemporalBounds(format!(
                "system_time_start ({start}) must be < system_time_end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    /// The period of a current (open) version recorded at `start`.
    pub fn open_from(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: open_timestamp(),
        }
    }

    pub fn is_current(&self) -> bool {
        self.end == open_timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
    }

    #[test]
    fn sentinels_are_year_9999() {
        assert_eq!(open_date().to_string(), "9999-12-31");
        assert_eq!(open_timestamp().to_string(), "9999-12-31 23:59:59");
    }

    #[test]
    fn valid_period_allows_empty_but_not_inverted() {
        assert!(ValidPeriod::new(d(5), d(5)).is_ok());
        assert!(ValidPeriod::new(d(6), d(5)).is_err());
        assert!(ValidPeriod::open_from(d(1)).is_open());
    }

    #[test]
    fn system_period_requires_strict_order() {
        let t = d(5).and_hms_opt(10, 0, 0).unwrap();
        assert!(SystemPeriod::new(t, t).is_err());
        assert!(SystemPeriod::open_from(t).is_current());
    }
}
