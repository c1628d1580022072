//! # chronicle-engine
//!
//! Multi-statement bitemporal plans on top of the statement compiler and a
//! read/execute collaborator:
//!
//! - versioned insert: close the identity's open version, then insert
//! - valid-time-scoped delete: split rows around a window instead of dropping them
//! - temporal reads: current version, as-of, valid-time and system-time relations
//!
//! Plans are not atomic. Callers serialize plans per logical identity, or
//! run the whole plan inside an external transaction (see
//! [`MutationEngine::bind`]).

pub mod engine;
pub mod mutation;
pub mod reader;

pub use engine::{system_now, MutationEngine};
pub use mutation::{MutationReport, MutationStep, StepKind, ValidWindow};
pub use reader::TemporalReader;
