//! Arbitrary-precision decimal literal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CompileError;

/// A decimal number kept as canonical text.
///
/// Only plain notation is accepted (`-12.50`, `.5`, `+3`). The canonical form
/// drops a leading `+`, strips redundant leading zeros from the integer part,
/// and keeps the fractional digits (the scale) exactly as given, so `1.50`
/// and `1.5` are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Decimal(String);

impl Decimal {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Decimal {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CompileError::InvalidArgument(format!("invalid decimal literal: {s:?}"));

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !frac_part.map_or(true, all_digits) {
            return Err(invalid());
        }
        if int_part.is_empty() && frac_part.map_or(true, str::is_empty) {
            return Err(invalid());
        }

        let int_digits = int_part.trim_start_matches('0');
        let int_digits = if int_digits.is_empty() { "0" } else { int_digits };

        let mut canonical = String::with_capacity(trimmed.len() + 1);
        let is_zero = int_digits == "0" && frac_part.map_or(true, |f| f.bytes().all(|b| b == b'0'));
        if negative && !is_zero {
            canonical.push('-');
        }
        canonical.push_str(int_digits);
        if let Some(frac) = frac_part.filter(|f| !f.is_empty()) {
            canonical.push('.');
            canonical.push_str(frac);
        }

        Ok(Self(canonical))
    }
}

impl TryFrom<String> for Decimal {
    type Error = CompileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Decimal> for String {
    fn from(value: Decimal) -> Self {
        value.0
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
