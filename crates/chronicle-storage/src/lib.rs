//! # chronicle-storage
//!
//! SQLite implementation of the read/execute collaborator.
//! One writer connection plus a round-robin read pool (WAL mode), row
//! decoding driven by a `TableSchema` shape hint, and table bootstrap.

pub mod decode;
pub mod executor;
pub mod pragmas;
pub mod schema;
pub mod session;

pub use executor::ConnectionExecutor;
pub use schema::ensure_table;
pub use session::SqliteSession;

use chronicle_core::errors::ExecutionError;

/// Helper to convert a rusqlite failure into an `ExecutionError`.
pub fn to_execution_err(e: rusqlite::Error) -> ExecutionError {
    ExecutionError::Sqlite {
        message: e.to_string(),
    }
}
