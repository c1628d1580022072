//! Row decoding: SQLite result rows → `TemporalRecord`, using the table
//! schema as the record-shape hint.

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use rusqlite::types::ValueRef;
use rusqlite::Row;

use chronicle_core::errors::ExecutionError;
use chronicle_core::models::{
    ColumnKind, Decimal, SystemPeriod, TableSchema, TemporalRecord, ValidPeriod, Value,
};

use crate::to_execution_err;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Decode one result row. `names` are the result-set column names in order.
///
/// The identity and all four period columns must be present. Columns the
/// schema does not know are kept as payload fields with their storage type.
/// Periods are taken as stored; a row mid-way through a mutation plan may
/// hold an inverted valid period and must still be readable.
pub fn decode_row(
    row: &Row<'_>,
    names: &[String],
    shape: &TableSchema,
) -> Result<TemporalRecord, ExecutionError> {
    let t = &shape.temporal;
    let mut identity = None;
    let (mut valid_start, mut valid_end) = (None, None);
    let (mut system_start, mut system_end) = (None, None);
    let mut fields = IndexMap::new();

    for (index, name) in names.iter().enumerate() {
        let raw = row.get_ref(index).map_err(to_execution_err)?;
        let value = match shape.column_kind(name) {
            Some(kind) => decode_value(raw, kind, name)?,
            None => infer_value(raw),
        };

        if *name == t.identity {
            identity = Some(value);
        } else if *name == t.valid_time_start {
            valid_start = Some(require_date(value, name)?);
        } else if *name == t.valid_time_end {
            valid_end = Some(require_date(value, name)?);
        } else if *name == t.system_time_start {
            system_start = Some(require_timestamp(value, name)?);
        } else if *name == t.system_time_end {
            system_end = Some(require_timestamp(value, name)?);
        } else {
            fields.insert(name.clone(), value);
        }
    }

    Ok(TemporalRecord {
        identity: identity.ok_or_else(|| missing(&t.identity))?,
        valid_time: ValidPeriod {
            start: valid_start.ok_or_else(|| missing(&t.valid_time_start))?,
            end: valid_end.ok_or_else(|| missing(&t.valid_time_end))?,
        },
        system_time: SystemPeriod {
            start: system_start.ok_or_else(|| missing(&t.system_time_start))?,
            end: system_end.ok_or_else(|| missing(&t.system_time_end))?,
        },
        fields,
    })
}

/// Decode a single stored value as the given column kind.
pub fn decode_value(raw: ValueRef<'_>, kind: ColumnKind, column: &str) -> Result<Value, ExecutionError> {
    let err = |message: String| ExecutionError::RowDecode {
        column: column.to_string(),
        message,
    };

    let value = match (kind, raw) {
        (_, ValueRef::Null) => Value::Null,
        (ColumnKind::Integer, ValueRef::Integer(i)) => Value::Int(i),
        (ColumnKind::Integer, ValueRef::Text(s)) => {
            let s = utf8(s, column)?;
            Value::Int(s.parse().map_err(|e| err(format!("{s:?}: {e}")))?)
        }
        (ColumnKind::Decimal, ValueRef::Integer(i)) => Value::Decimal(Decimal::from(i)),
        (ColumnKind::Decimal, ValueRef::Real(f)) => Value::Decimal(
            f.to_string()
                .parse()
                .map_err(|e| err(format!("{f}: {e}")))?,
        ),
        (ColumnKind::Decimal, ValueRef::Text(s)) => {
            Value::Decimal(decimal_text(utf8(s, column)?, column)?)
        }
        (ColumnKind::Text, ValueRef::Text(s)) => Value::Text(utf8(s, column)?.to_string()),
        (ColumnKind::Text, ValueRef::Integer(i)) => Value::Text(i.to_string()),
        (ColumnKind::Text, ValueRef::Real(f)) => Value::Text(f.to_string()),
        (ColumnKind::Char, ValueRef::Text(s)) => {
            let s = utf8(s, column)?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => return Err(err(format!("expected a single character, found {s:?}"))),
            }
        }
        (ColumnKind::Uuid, ValueRef::Text(s)) => {
            let s = utf8(s, column)?;
            Value::Uuid(uuid::Uuid::parse_str(s).map_err(|e| err(format!("{s:?}: {e}")))?)
        }
        (ColumnKind::Uuid, ValueRef::Blob(b)) => {
            Value::Uuid(uuid::Uuid::from_slice(b).map_err(|e| err(e.to_string()))?)
        }
        (ColumnKind::Date, ValueRef::Text(s)) => {
            let s = utf8(s, column)?;
            Value::Date(
                NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| err(format!("{s:?}: {e}")))?,
            )
        }
        (ColumnKind::Timestamp, ValueRef::Text(s)) => {
            let s = utf8(s, column)?;
            Value::Timestamp(
                NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
                    .map_err(|e| err(format!("{s:?}: {e}")))?,
            )
        }
        (kind, other) => {
            return Err(err(format!(
                "expected {kind:?}, found sqlite {:?}",
                other.data_type()
            )))
        }
    };
    Ok(value)
}

/// Decode a value whose column the schema does not describe.
pub fn infer_value(raw: ValueRef<'_>) -> Value {
    match raw {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => f
            .to_string()
            .parse::<Decimal>()
            .map_or_else(|_| Value::Text(f.to_string()), Value::Decimal),
        ValueRef::Text(s) => Value::Text(String::from_utf8_lossy(s).into_owned()),
        ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
    }
}

/// Stored decimal text. Quoted literals arrive digit for digit; an unquoted
/// literal written into a TEXT column arrives in SQLite's float rendering
/// (`1.0e+16`), which is read back through `f64`.
fn decimal_text(s: &str, column: &str) -> Result<Decimal, ExecutionError> {
    let err = |message: String| ExecutionError::RowDecode {
        column: column.to_string(),
        message,
    };
    s.parse::<Decimal>().or_else(|_| {
        let f: f64 = s.parse().map_err(|e| err(format!("{s:?}: {e}")))?;
        if !f.is_finite() {
            return Err(err(format!("{s:?} is not a finite decimal")));
        }
        f.to_string().parse().map_err(|e| err(format!("{s:?}: {e}")))
    })
}

fn utf8<'a>(bytes: &'a [u8], column: &str) -> Result<&'a str, ExecutionError> {
    std::str::from_utf8(bytes).map_err(|e| ExecutionError::RowDecode {
        column: column.to_string(),
        message: e.to_string(),
    })
}

fn require_date(value: Value, column: &str) -> Result<NaiveDate, ExecutionError> {
    value.as_date().ok_or_else(|| ExecutionError::RowDecode {
        column: column.to_string(),
        message: format!("expected a date, found {}", value.kind_name()),
    })
}

fn require_timestamp(value: Value, column: &str) -> Result<NaiveDateTime, ExecutionError> {
    value.as_timestamp().ok_or_else(|| ExecutionError::RowDecode {
        column: column.to_string(),
        message: format!("expected a timestamp, found {}", value.kind_name()),
    })
}

fn missing(column: &str) -> ExecutionError {
    ExecutionError::RowDecode {
        column: column.to_string(),
        message: "column missing from result set".to_string(),
    }
}
