//! # chronicle-query
//!
//! Everything that turns typed values into statement text:
//! literal formatting, the predicate tree, the temporal relation library,
//! and the SELECT / INSERT / UPDATE / DELETE compiler.

pub mod compiler;
pub mod literal;
pub mod predicate;
pub mod statement;
pub mod temporal;

pub use compiler::StatementCompiler;
pub use literal::{format_literal, format_literal_with};
pub use predicate::{ComparisonOp, Predicate};
pub use statement::{Delete, Insert, Select, Statement, Update};
pub use temporal::{IntervalRelation, SystemTimeRelation};
