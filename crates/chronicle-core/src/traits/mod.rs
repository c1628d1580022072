mod schema_catalog;
mod statement_executor;

pub use schema_catalog::ISchemaCatalog;
pub use statement_executor::{random_identities, IStatementExecutor};
