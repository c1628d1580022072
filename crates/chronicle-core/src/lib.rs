//! # chronicle-core
//!
//! Foundation types for the Chronicle bitemporal statement compiler:
//! values, records, periods, table schemas, errors, config, and the two
//! collaborator traits (schema catalog, statement executor).

pub mod catalog;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod traits;

pub use catalog::StaticCatalog;
pub use config::ChronicleConfig;
pub use errors::{ChronicleError, ChronicleResult, CompileError, CompileResult, ExecutionError};
pub use models::{TableSchema, TemporalRecord, Value};
