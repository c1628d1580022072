/// Failures reported by the read/execute collaborator.
///
/// The core never inspects these; they travel back to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("sqlite error: {message}")]
    Sqlite { message: String },

    #[error("cannot decode column {column}: {message}")]
    RowDecode { column: String, message: String },

    #[error("cannot allocate identities for {table}: {message}")]
    IdentityAllocation { table: String, message: String },

    #[error("connection lock poisoned")]
    Poisoned,

    #[error("{0}")]
    Other(String),
}
