//! Scoped access to a store's SQLite connection.
//!
//! Each store owns exactly one [`SqliteHandle`]. Callers never hold the
//! connection across operations: [`SqliteHandle::with_connection`] locks it
//! for the duration of a closure and releases it on return.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

pub(crate) struct SqliteHandle {
    store: &'static str,
    connection: Mutex<Connection>,
}

impl SqliteHandle {
    /// Open (creating if necessary) a database file and apply `schema`.
    pub(crate) fn open(store: &'static str, path: &Path, schema: &str) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(store, path = %path.display(), "opening store");
        Self::init(store, Connection::open(path)?, schema)
    }

    /// Open a database file that must already exist.
    pub(crate) fn open_existing(store: &'static str, path: &Path, schema: &str) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatabaseNotFound {
                path: path.to_path_buf(),
            });
        }
        Self::open(store, path, schema)
    }

    pub(crate) fn open_in_memory(store: &'static str, schema: &str) -> Result<Self> {
        Self::init(store, Connection::open_in_memory()?, schema)
    }

    fn init(store: &'static str, connection: Connection, schema: &str) -> Result<Self> {
        connection.execute_batch(schema)?;
        Ok(Self {
            store,
            connection: Mutex::new(connection),
        })
    }

    pub(crate) fn with_connection<T>(
        &self,
        operation: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        let mut connection = self
            .connection
            .lock()
            .map_err(|_| Error::StoreUnavailable { store: self.store })?;
        operation(&mut connection)
    }

    /// Cheap round trip used by readiness checks.
    pub(crate) fn ping(&self) -> Result<()> {
        self.with_connection(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
    }
}

impl std::fmt::Debug for SqliteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteHandle")
            .field("store", &self.store)
            .finish()
    }
}
