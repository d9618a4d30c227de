use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_wal() -> bool {
    true
}

/// Configuration for the embedded store.
///
/// Deserializable so a host application can carry it in its settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file path; `None` opens an in-memory store.
    pub path: Option<PathBuf>,
    /// Applied via `PRAGMA busy_timeout` on open.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Use WAL journaling for file-backed stores.
    #[serde(default = "default_wal")]
    pub wal: bool,
}

impl StoreConfig {
    /// Configuration for a file-backed store at `path`.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            busy_timeout_ms: default_busy_timeout_ms(),
            wal: default_wal(),
        }
    }

    /// Configuration for an in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            path: None,
            busy_timeout_ms: default_busy_timeout_ms(),
            wal: false,
        }
    }

    /// Override the busy timeout.
    #[must_use]
    pub fn busy_timeout_ms(mut self, ms: u64) -> Self {
        self.busy_timeout_ms = ms;
        self
    }
}

/// Owns the embedded database handle, opening it lazily on first use.
///
/// The handle is process long-lived and shared; a mutex serializes every
/// access, which is the single writer-at-a-time discipline the engine
/// expects of one connection. Readable and writable access share the same
/// handle. An open failure surfaces as [`StoreError::Connection`] and is not
/// retried here; retry policy belongs to callers.
pub struct ConnectionProvider {
    config: StoreConfig,
    conn: Mutex<Option<Connection>>,
}

impl ConnectionProvider {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            conn: Mutex::new(None),
        }
    }

    /// Provider over an in-memory store. Handy for tests and previews.
    #[must_use]
    pub fn open_in_memory() -> Self {
        Self::new(StoreConfig::memory())
    }

    /// Run `f` with exclusive writable access to the handle.
    ///
    /// # Errors
    /// Returns [`StoreError::Connection`] if the store cannot be opened or
    /// the handle cannot be acquired; otherwise whatever `f` returns.
    pub fn with_writable<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.acquire()?;
        // acquire() leaves the slot populated
        let conn = guard
            .as_mut()
            .ok_or_else(|| StoreError::Connection("store handle missing after open".into()))?;
        f(conn)
    }

    /// Run `f` with readable access to the handle (same handle as writes).
    ///
    /// # Errors
    /// Returns [`StoreError::Connection`] if the store cannot be opened or
    /// the handle cannot be acquired; otherwise whatever `f` returns.
    pub fn with_readable<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        self.with_writable(|conn| f(conn))
    }

    /// Close the handle. The next access reopens the store.
    ///
    /// # Errors
    /// Returns [`StoreError::Connection`] if the handle cannot be acquired
    /// or the engine refuses to close it.
    pub fn close(&self) -> Result<(), StoreError> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| StoreError::Connection("store mutex poisoned".into()))?;
        if let Some(conn) = guard.take() {
            conn.close()
                .map_err(|(_, e)| StoreError::Connection(format!("failed to close store: {e}")))?;
            debug!("store handle closed");
        }
        Ok(())
    }

    fn acquire(&self) -> Result<MutexGuard<'_, Option<Connection>>, StoreError> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| StoreError::Connection("store mutex poisoned".into()))?;
        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        Ok(guard)
    }

    fn open(&self) -> Result<Connection, StoreError> {
        let conn = match &self.config.path {
            Some(path) => Connection::open(path)
                .map_err(|e| StoreError::Connection(format!("failed to open {path:?}: {e}")))?,
            None => Connection::open_in_memory()
                .map_err(|e| StoreError::Connection(format!("failed to open in-memory store: {e}")))?,
        };

        let mut pragmas = String::new();
        if self.config.wal && self.config.path.is_some() {
            pragmas.push_str("PRAGMA journal_mode = WAL;\n");
        }
        pragmas.push_str(&format!(
            "PRAGMA busy_timeout = {};\n",
            self.config.busy_timeout_ms
        ));
        pragmas.push_str("PRAGMA foreign_keys = ON;\n");
        conn.execute_batch(&pragmas)
            .map_err(|e| StoreError::Connection(format!("failed to apply pragmas: {e}")))?;

        debug!(path = ?self.config.path, "store opened");
        Ok(conn)
    }
}
