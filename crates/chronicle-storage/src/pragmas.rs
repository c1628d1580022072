//! SQLite PRAGMA configuration.
//! Must be called on every connection immediately after opening.

use rusqlite::Connection;

use chronicle_core::errors::ExecutionError;

use crate::to_execution_err;

/// Configure a read-write connection.
///
/// - WAL so readers keep working during writes
/// - busy_timeout as the lock-contention mechanism
/// - NORMAL synchronous, the usual WAL durability trade-off
pub fn apply_pragmas(conn: &Connection) -> Result<(), ExecutionError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(to_execution_err)
}

/// Same as [`apply_pragmas`] plus `query_only`, so a reader can never write.
pub fn apply_readonly_pragmas(conn: &Connection) -> Result<(), ExecutionError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        PRAGMA query_only = ON;
        ",
    )
    .map_err(to_execution_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sets_busy_timeout_and_foreign_keys() {
        let conn = Connection::open_in_memory().unwrap();
        apply_pragmas(&conn).unwrap();

        let timeout: i64 = conn
            .pragma_query_value(None, "busy_timeout", |row| row.get(0))
            .unwrap();
        assert_eq!(timeout, 5000);
        let fk: i64 = conn
            .pragma_query_value(None, "foreign_keys", |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn readonly_connection_rejects_writes() {
        let conn = Connection::open_in_memory().unwrap();
        apply_readonly_pragmas(&conn).unwrap();
        assert!(conn.execute_batch("CREATE TABLE t (x INTEGER)").is_err());
    }
}
