use rusqlite::Connection;

use crate::error::StoreError;

/// A single write unit of work.
///
/// Implementations run exactly one statement against the connection and
/// return an operation-specific number: the generated row id for an insert,
/// or the affected-row count for an update/delete. Engine errors propagate
/// to the caller unwrapped; units never swallow them.
///
/// Units are short-lived values, built per call and discarded after one
/// execution — either standalone via [`ConnectionProvider::run_exec`] or as
/// part of a transaction via [`ConnectionProvider::run_batch`].
///
/// [`ConnectionProvider::run_exec`]: crate::provider::ConnectionProvider::run_exec
/// [`ConnectionProvider::run_batch`]: crate::provider::ConnectionProvider::run_batch
pub trait DbExec {
    /// Run the write against the given connection.
    ///
    /// # Errors
    /// Returns an error if the engine rejects the statement.
    fn exec(&self, conn: &Connection) -> Result<i64, StoreError>;
}

/// Adapter turning a closure into a [`DbExec`].
///
/// Lets a service layer contribute ad-hoc units to a batch without defining
/// a struct per statement:
/// ```rust,no_run
/// use messenger_store::prelude::*;
///
/// let touch = FnExec::new(|conn| {
///     conn.execute("UPDATE chats SET last_messages_count = 0", [])
///         .map(|n| n as i64)
///         .map_err(StoreError::from)
/// });
/// # let _ = touch;
/// ```
pub struct FnExec<F>
where
    F: Fn(&Connection) -> Result<i64, StoreError>,
{
    f: F,
}

impl<F> FnExec<F>
where
    F: Fn(&Connection) -> Result<i64, StoreError>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> DbExec for FnExec<F>
where
    F: Fn(&Connection) -> Result<i64, StoreError>,
{
    fn exec(&self, conn: &Connection) -> Result<i64, StoreError> {
        (self.f)(conn)
    }
}
