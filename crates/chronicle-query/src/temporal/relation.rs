//! Temporal relations as data, for callers that pick the relation at runtime.

use serde::{Deserialize, Serialize};

use chronicle_core::errors::CompileResult;
use chronicle_core::models::{IntervalColumns, Value};

use super::{system_time, valid_time};
use crate::predicate::Predicate;

/// Allen-style relations between a stored interval and query bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum IntervalRelation {
    Contains { start: Value, end: Value },
    Equals { start: Value, end: Value },
    Precedes { start: Value },
    ImmediatelyPrecedes { start: Value },
    Succeeds { end: Value },
    ImmediatelySucceeds { end: Value },
    Overlaps { start: Value, end: Value },
}

impl IntervalRelation {
    pub fn to_predicate(&self, columns: &IntervalColumns) -> CompileResult<Predicate> {
        match self {
            Self::Contains { start, end } => valid_time::contains(columns, start.clone(), end.clone()),
            Self::Equals { start, end } => valid_time::equals(columns, start.clone(), end.clone()),
            Self::Precedes { start } => valid_time::precedes(columns, start.clone()),
            Self::ImmediatelyPrecedes { start } => {
                valid_time::immediately_precedes(columns, start.clone())
            }
            Self::Succeeds { end } => valid_time::succeeds(columns, end.clone()),
            Self::ImmediatelySucceeds { end } => {
                valid_time::immediately_succeeds(columns, end.clone())
            }
            Self::Overlaps { start, end } => valid_time::overlaps(columns, start.clone(), end.clone()),
        }
    }
}

/// System-time (audit) relations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum SystemTimeRelation {
    Between { start: Value, end: Value },
    AsOf { instant: Value },
    From { start: Value, end: Value },
}

impl SystemTimeRelation {
    pub fn to_predicate(&self, columns: &IntervalColumns) -> CompileResult<Predicate> {
        match self {
            Self::Between { start, end } => system_time::between(columns, start.clone(), end.clone()),
            Self::AsOf { instant } => system_time::as_of(columns, instant.clone()),
            Self::From { start, end } => system_time::from(columns, start.clone(), end.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn relation_matches_function_output() {
        let cols = IntervalColumns::new("vs", "ve");
        let (s, e) = (
            NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 17).unwrap(),
        );
        let relation = IntervalRelation::Overlaps {
            start: s.into(),
            end: e.into(),
        };
        assert_eq!(
            relation.to_predicate(&cols).unwrap(),
            valid_time::overlaps(&cols, s, e).unwrap()
        );
    }

    #[test]
    fn relation_serde_is_tagged() {
        let relation = SystemTimeRelation::AsOf {
            instant: Value::Int(1),
        };
        let json = serde_json::to_value(&relation).unwrap();
        assert_eq!(json["relation"], "as_of");
        let back: SystemTimeRelation = serde_json::from_value(json).unwrap();
        assert_eq!(back, relation);
    }
}
