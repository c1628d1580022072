//! Immutable boolean expression tree over column comparisons.
//!
//! Rendering is an observed contract, not a pretty-printer: child order is
//! kept verbatim, a single child is emitted without parentheses, and nothing
//! is simplified or deduplicated.

use std::fmt;

use serde::{Deserialize, Serialize};

use chronicle_core::config::DecimalLiterals;
use chronicle_core::errors::{CompileError, CompileResult};
use chronicle_core::models::Value;

use crate::literal::format_literal_with;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicate. Equality and hashing are structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    Comparison {
        column: String,
        op: ComparisonOp,
        value: Value,
    },
    And {
        children: Vec<Predicate>,
    },
    Or {
        children: Vec<Predicate>,
    },
    Not {
        child: Box<Predicate>,
    },
}

#[allow(clippy::should_implement_trait)]
impl Predicate {
    /// `column op value`. Fails if the column is blank or the value is `Null`.
    pub fn comparison(
        column: impl Into<String>,
        op: ComparisonOp,
        value: impl Into<Value>,
    ) -> CompileResult<Self> {
        let column = column.into();
        if column.trim().is_empty() {
            return Err(CompileError::NullPredicate { argument: "column" });
        }
        let value = value.into();
        if value.is_null() {
            return Err(CompileError::NullPredicate { argument: "value" });
        }
        Ok(Self::Comparison { column, op, value })
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> CompileResult<Self> {
        Self::comparison(column, ComparisonOp::Eq, value)
    }

    pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> CompileResult<Self> {
        Self::comparison(column, ComparisonOp::Ne, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> CompileResult<Self> {
        Self::comparison(column, ComparisonOp::Lt, value)
    }

    pub fn le(column: impl Into<String>, value: impl Into<Value>) -> CompileResult<Self> {
        Self::comparison(column, ComparisonOp::Le, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> CompileResult<Self> {
        Self::comparison(column, ComparisonOp::Gt, value)
    }

    pub fn ge(column: impl Into<String>, value: impl Into<Value>) -> CompileResult<Self> {
        Self::comparison(column, ComparisonOp::Ge, value)
    }

    pub fn and(children: impl IntoIterator<Item = Predicate>) -> Self {
        Self::And {
            children: children.into_iter().collect(),
        }
    }

    pub fn or(children: impl IntoIterator<Item = Predicate>) -> Self {
        Self::Or {
            children: children.into_iter().collect(),
        }
    }

    pub fn not(child: Predicate) -> Self {
        Self::Not {
            child: Box::new(child),
        }
    }

    /// `column = v1 OR column = v2 ...`, the tree form of `column IN (...)`.
    /// An empty value list produces an empty OR, which renders as nothing.
    pub fn any_of<V: Into<Value>>(
        column: &str,
        values: impl IntoIterator<Item = V>,
    ) -> CompileResult<Self> {
        let children = values
            .into_iter()
            .map(|v| Self::eq(column, v))
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(Self::Or { children })
    }

    /// Render to statement text.
    pub fn render(&self) -> CompileResult<String> {
        self.render_with(DecimalLiterals::Numeric)
    }

    /// Render with decimals written in the given style.
    pub fn render_with(&self, decimals: DecimalLiterals) -> CompileResult<String> {
        let mut out = String::new();
        self.render_into(&mut out, decimals)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String, decimals: DecimalLiterals) -> CompileResult<()> {
        match self {
            Self::Comparison { column, op, value } => {
                out.push_str(column);
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                out.push_str(&format_literal_with(value, decimals)?);
            }
            Self::And { children } => render_group(children, " AND ", out, decimals)?,
            Self::Or { children } => render_group(children, " OR ", out, decimals)?,
            Self::Not { child } => {
                out.push_str("NOT ");
                child.render_into(out, decimals)?;
            }
        }
        Ok(())
    }
}

fn render_group(
    children: &[Predicate],
    joiner: &str,
    out: &mut String,
    decimals: DecimalLiterals,
) -> CompileResult<()> {
    match children {
        [] => {}
        [only] => only.render_into(out, decimals)?,
        [first, rest @ ..] => {
            out.push('(');
            first.render_into(out, decimals)?;
            for child in rest {
                out.push_str(joiner);
                child.render_into(out, decimals)?;
            }
            out.push(')');
        }
    }
    Ok(())
}

/// Render a list of top-level predicates joined by ` AND ` (no parentheses).
///
/// An empty `And`/`Or` group renders as empty text, so it leaves a dangling
/// ` AND ` (or a bare `WHERE `) in the output.
pub fn render_conjunction(predicates: &[Predicate]) -> CompileResult<String> {
    render_conjunction_with(predicates, DecimalLiterals::Numeric)
}

/// [`render_conjunction`] with decimals written in the given style.
pub fn render_conjunction_with(
    predicates: &[Predicate],
    decimals: DecimalLiterals,
) -> CompileResult<String> {
    let rendered = predicates
        .iter()
        .map(|p| p.render_with(decimals))
        .collect::<CompileResult<Vec<_>>>()?;
    Ok(rendered.join(" AND "))
}
