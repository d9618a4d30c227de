use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors produced by the storage core.
///
/// The variants map onto the four failure kinds callers are expected to
/// distinguish: connection failures are fatal to the calling operation,
/// constraint violations are recoverable by the caller, mapping failures
/// indicate schema drift, and a transaction abort wraps whichever unit
/// error triggered the rollback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be opened or its handle could not be acquired.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A write violated a uniqueness or other engine-level constraint.
    #[error("Constraint violation: {0}")]
    Constraint(rusqlite::Error),

    /// A cursor row could not be converted back into an entity.
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// A batch unit failed; the transaction was rolled back before this was raised.
    #[error("Transaction aborted: {0}")]
    TransactionAborted(#[source] Box<StoreError>),

    /// Any other engine error, passed through unwrapped.
    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

impl StoreError {
    /// True when the error is (or wraps, via a transaction abort) a
    /// constraint violation.
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            StoreError::Constraint(_) => true,
            StoreError::TransactionAborted(inner) => inner.is_constraint_violation(),
            _ => false,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                StoreError::Constraint(err)
            }
            _ => StoreError::Sqlite(err),
        }
    }
}
