//! Statement compiler configuration.

use serde::{Deserialize, Serialize};

/// How decimal values are written into statement text.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DecimalLiterals {
    /// Unquoted canonical decimal text: `123.45`.
    #[default]
    Numeric,
    /// Single-quoted canonical decimal text: `'123.45'`. For stores that
    /// parse unquoted numbers into binary floating point and would drop
    /// digits; ordering comparisons on such columns become textual.
    Quoted,
}

/// Configuration for the statement compiler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompilerConfig {
    /// Reject INSERT batches whose rows do not share the first row's columns
    /// (same names, same order). When false, the column list still comes from
    /// the first row and later rows are rendered as given.
    pub strict_insert_rows: bool,
    pub decimal_literals: DecimalLiterals,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            strict_insert_rows: true,
            decimal_literals: DecimalLiterals::Numeric,
        }
    }
}
