/// Errors raised while building predicates or compiling statements.
///
/// All of these are construction-time errors: they surface synchronously,
/// before any statement reaches a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("unsupported literal kind: {kind}")]
    UnsupportedLiteralKind { kind: String },

    #[error("required argument missing: {argument}")]
    NullPredicate { argument: &'static str },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no table registered for record type: {record_type}")]
    UnknownTable { record_type: String },

    #[error("insert row {row} has columns [{found}], expected [{expected}]")]
    HeterogeneousRows {
        row: usize,
        expected: String,
        found: String,
    },
}

/// Convenience type alias.
pub type CompileResult<T> = Result<T, CompileError>;
