//! Temporal relation library.
//!
//! Pure builders producing predicates over a stored interval (`S2`, `E2`)
//! and caller-given bounds. `valid_time` carries the Allen-style subset,
//! `system_time` the audit reads. Both take an [`IntervalColumns`] pair, so
//! the valid-time relations apply to system-time columns as well.
//!
//! [`IntervalColumns`]: chronicle_core::models::IntervalColumns

pub mod relation;
pub mod system_time;
pub mod valid_time;

pub use relation::{IntervalRelation, SystemTimeRelation};
