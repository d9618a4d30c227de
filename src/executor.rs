//! Runners that carry exec/query units to the store handle.
//!
//! Single units run as-is (one statement is atomic at the engine level);
//! batches run under one transaction with all-or-nothing semantics.

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::exec::DbExec;
use crate::provider::ConnectionProvider;
use crate::query::DbQuery;
use crate::sqlite::{CursorRows, convert_params};

impl ConnectionProvider {
    /// Run a single write unit outside any explicit transaction.
    ///
    /// # Errors
    /// Propagates the unit's error unwrapped.
    pub fn run_exec(&self, exec: &dyn DbExec) -> Result<i64, StoreError> {
        self.with_writable(|conn| exec.exec(conn))
    }

    /// Run a read unit: open the cursor, let the unit materialize it once,
    /// and release the cursor on every exit path.
    ///
    /// # Errors
    /// Propagates statement, cursor, and mapping errors from the unit.
    pub fn run_query<Q: DbQuery>(&self, query: &Q) -> Result<Q::Output, StoreError> {
        let stmt_and_params = query.statement();
        self.with_readable(|conn| {
            let mut stmt = conn.prepare(&stmt_and_params.query)?;
            let column_names: Vec<String> =
                stmt.column_names().iter().map(|s| (*s).to_string()).collect();
            let params = convert_params(&stmt_and_params.params);
            let rows = stmt.query(rusqlite::params_from_iter(params))?;
            let mut cursor = CursorRows::new(rows, column_names);
            query.materialize(&mut cursor)
            // statement and rows drop here, success or not
        })
    }

    /// Run an ordered sequence of write units inside one transaction.
    ///
    /// Units run in order; on the first failure no further units run, the
    /// transaction is rolled back, and the failure is returned wrapped in
    /// [`StoreError::TransactionAborted`]. The batch commits only if every
    /// unit succeeded.
    ///
    /// # Errors
    /// Returns [`StoreError::TransactionAborted`] on unit failure, or the
    /// engine's error if begin/commit themselves fail.
    pub fn run_batch(&self, execs: &[&dyn DbExec]) -> Result<(), StoreError> {
        self.with_writable(|conn| {
            let tx = conn.transaction()?;
            for (i, unit) in execs.iter().enumerate() {
                if let Err(cause) = unit.exec(&tx) {
                    warn!(unit = i, total = execs.len(), %cause, "batch unit failed, rolling back");
                    if let Err(rollback_err) = tx.rollback() {
                        warn!(%rollback_err, "rollback after failed batch unit also failed");
                    }
                    return Err(StoreError::TransactionAborted(Box::new(cause)));
                }
            }
            tx.commit()?;
            debug!(units = execs.len(), "batch committed");
            Ok(())
        })
    }

    /// Run a raw multi-statement SQL script inside one transaction.
    ///
    /// Intended for schema setup and other DDL the host application owns.
    ///
    /// # Errors
    /// Returns the engine's error; the transaction is rolled back on failure.
    pub fn execute_batch_sql(&self, sql: &str) -> Result<(), StoreError> {
        self.with_writable(|conn| {
            let tx = conn.transaction()?;
            tx.execute_batch(sql)?;
            tx.commit()?;
            Ok(())
        })
    }
}
