//! SqliteSession: one writer plus a round-robin read pool.
//!
//! The only place in this crate that holds `Mutex<Connection>`. Reads go
//! to a reader, writes to the writer. `transaction` pins a whole mutation
//! plan to the writer under `BEGIN IMMEDIATE`.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, warn};

use chronicle_core::errors::ExecutionError;
use chronicle_core::models::{TableSchema, TemporalRecord, Value};
use chronicle_core::traits::IStatementExecutor;

use crate::executor::{allocate_identities, execute_statement, query_records, ConnectionExecutor};
use crate::{pragmas, to_execution_err};

/// Default number of reader connections.
const DEFAULT_READ_POOL_SIZE: usize = 2;

pub struct SqliteSession {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    read_index: AtomicUsize,
}

impl SqliteSession {
    /// Open a file-backed session with `read_pool_size` readers (0 picks the default).
    pub fn open(path: &Path, read_pool_size: usize) -> Result<Self, ExecutionError> {
        let pool_size = if read_pool_size == 0 {
            DEFAULT_READ_POOL_SIZE
        } else {
            read_pool_size
        };

        let writer = Connection::open(path).map_err(to_execution_err)?;
        pragmas::apply_pragmas(&writer)?;

        let mut readers = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let reader = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(to_execution_err)?;
            pragmas::apply_readonly_pragmas(&reader)?;
            readers.push(Mutex::new(reader));
        }
        debug!(path = %path.display(), readers = pool_size, "opened sqlite session");

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            read_index: AtomicUsize::new(0),
        })
    }

    /// Open a private in-memory database. There are no readers; reads use the writer.
    pub fn open_in_memory() -> Result<Self, ExecutionError> {
        let writer = Connection::open_in_memory().map_err(to_execution_err)?;
        pragmas::apply_pragmas(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Vec::new(),
            read_index: AtomicUsize::new(0),
        })
    }

    /// Execute a closure with the writer connection.
    pub fn with_writer<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<ExecutionError>,
    {
        let conn = self.writer.lock().map_err(|_| ExecutionError::Poisoned)?;
        f(&conn)
    }

    /// Execute a closure with a reader connection (round-robin).
    ///
    /// Falls back to the writer when there are no readers (in-memory mode).
    pub fn with_reader<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Connection) -> Result<T, E>,
        E: From<ExecutionError>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }

        let index = self.read_index.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[index]
            .lock()
            .map_err(|_| ExecutionError::Poisoned)?;
        f(&conn)
    }

    /// Run `f` inside `BEGIN IMMEDIATE` on the writer.
    ///
    /// Commits when `f` returns `Ok`, rolls back otherwise. Every statement
    /// `f` issues through the executor it is given is part of the transaction.
    pub fn transaction<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(ConnectionExecutor<'_>) -> Result<T, E>,
        E: From<ExecutionError>,
    {
        self.with_writer(|conn| {
            conn.execute_batch("BEGIN IMMEDIATE")
                .map_err(to_execution_err)?;
            match f(ConnectionExecutor::new(conn)) {
                Ok(value) => {
                    conn.execute_batch("COMMIT").map_err(to_execution_err)?;
                    Ok(value)
                }
                Err(e) => {
                    if let Err(rollback_err) = conn.execute_batch("ROLLBACK") {
                        warn!(error = %rollback_err, "rollback failed");
                    }
                    Err(e)
                }
            }
        })
    }

    /// Number of reader connections.
    pub fn reader_count(&self) -> usize {
        self.readers.len()
    }

    /// Check WAL mode on the writer connection.
    pub fn is_wal_mode(&self) -> bool {
        self.with_writer(|conn| {
            let mode: String = conn
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap_or_default();
            Ok::<_, ExecutionError>(mode.eq_ignore_ascii_case("wal"))
        })
        .unwrap_or(false)
    }
}

impl IStatementExecutor for SqliteSession {
    fn query(&self, sql: &str, shape: &TableSchema) -> Result<Vec<TemporalRecord>, ExecutionError> {
        self.with_reader(|conn| query_records(conn, sql, shape))
    }

    fn execute(&self, sql: &str) -> Result<usize, ExecutionError> {
        self.with_writer(|conn| execute_statement(conn, sql))
    }

    fn allocate_identities(
        &self,
        shape: &TableSchema,
        count: usize,
    ) -> Result<Vec<Value>, ExecutionError> {
        self.with_writer(|conn| allocate_identities(conn, shape, count))
    }
}
