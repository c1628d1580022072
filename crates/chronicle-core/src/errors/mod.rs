mod chronicle_error;
mod compile_error;
mod execution_error;

pub use chronicle_error::{ChronicleError, ChronicleResult};
pub use compile_error::{CompileError, CompileResult};
pub use execution_error::ExecutionError;
