//! Typed value → literal text.

use chronicle_core::config::DecimalLiterals;
use chronicle_core::errors::{CompileError, CompileResult};
use chronicle_core::models::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Render a value as it appears inside a statement.
///
/// Text-like kinds are single-quoted without escaping; callers must not pass
/// embedded quotes. Numbers are unquoted. `Raw` is emitted verbatim so
/// server-side expressions can be embedded. `Null` and `Bytes` have no
/// literal form.
pub fn format_literal(value: &Value) -> CompileResult<String> {
    format_literal_with(value, DecimalLiterals::Numeric)
}

/// [`format_literal`], with decimals written in the given style.
pub fn format_literal_with(value: &Value, decimals: DecimalLiterals) -> CompileResult<String> {
    let literal = match value {
        Value::Date(d) => format!("'{}'", d.format(DATE_FORMAT)),
        Value::Timestamp(t) => format!("'{}'", t.format(TIMESTAMP_FORMAT)),
        Value::Text(s) => format!("'{s}'"),
        Value::Char(c) => format!("'{c}'"),
        Value::Uuid(u) => format!("'{}'", u.hyphenated()),
        Value::Int(i) => i.to_string(),
        Value::Decimal(d) => match decimals {
            DecimalLiterals::Numeric => d.to_string(),
            DecimalLiterals::Quoted => format!("'{d}'"),
        },
        Value::Raw(expr) => expr.clone(),
        Value::Null | Value::Bytes(_) => {
            return Err(CompileError::UnsupportedLiteralKind {
                kind: value.kind_name().to_string(),
            })
        }
    };
    Ok(literal)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use chronicle_core::models::Decimal;

    use super::*;

    #[test]
    fn date_is_zero_padded() {
        let d = NaiveDate::from_ymd_opt(2020, 2, 20).unwrap();
        assert_eq!(format_literal(&d.into()).unwrap(), "'2020-02-20'");
        let early = NaiveDate::from_ymd_opt(987, 1, 2).unwrap();
        assert_eq!(format_literal(&early.into()).unwrap(), "'0987-01-02'");
    }

    #[test]
    fn timestamp_has_six_fraction_digits() {
        let t = NaiveDate::from_ymd_opt(2020, 2, 3)
            .unwrap()
            .and_hms_opt(4, 5, 6)
            .unwrap();
        assert_eq!(format_literal(&t.into()).unwrap(), "'2020-02-03 04:05:06.000000'");

        let micro = NaiveDate::from_ymd_opt(2020, 2, 3)
            .unwrap()
            .and_hms_micro_opt(4, 5, 6, 42)
            .unwrap();
        assert_eq!(format_literal(&micro.into()).unwrap(), "'2020-02-03 04:05:06.000042'");
    }

    #[test]
    fn numbers_are_unquoted() {
        let price: Decimal = "123.45".parse().unwrap();
        assert_eq!(format_literal(&price.into()).unwrap(), "123.45");
        assert_eq!(format_literal(&Value::Int(-3)).unwrap(), "-3");
    }

    #[test]
    fn quoted_style_only_touches_decimals() {
        let price: Decimal = "12345678901234567.89".parse().unwrap();
        assert_eq!(
            format_literal_with(&price.into(), DecimalLiterals::Quoted).unwrap(),
            "'12345678901234567.89'"
        );
        assert_eq!(
            format_literal_with(&Value::Int(7), DecimalLiterals::Quoted).unwrap(),
            "7"
        );
    }

    #[test]
    fn text_is_quoted_without_escaping() {
        assert_eq!(format_literal(&"AMZN".into()).unwrap(), "'AMZN'");
        assert_eq!(format_literal(&'B'.into()).unwrap(), "'B'");
        assert_eq!(format_literal(&"it's".into()).unwrap(), "'it's'");
    }

    #[test]
    fn raw_is_verbatim() {
        assert_eq!(format_literal(&Value::raw("CURRENT_TIMESTAMP")).unwrap(), "CURRENT_TIMESTAMP");
    }

    #[test]
    fn null_and_bytes_are_unsupported() {
        assert_eq!(
            format_literal(&Value::Null),
            Err(CompileError::UnsupportedLiteralKind { kind: "null".into() })
        );
        assert!(format_literal(&Value::Bytes(vec![1, 2])).is_err());
    }
}
