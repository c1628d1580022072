use super::{CompileError, ExecutionError};

/// Top-level error type for Chronicle.
/// Subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum ChronicleError {
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("invalid temporal bounds: {0}")]
    InvalidTemporalBounds(String),

    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias.
pub type ChronicleResult<T> = Result<T, ChronicleError>;
