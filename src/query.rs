use crate::error::StoreError;
use crate::sqlite::CursorRows;
use crate::types::RowValues;

/// A SQL statement and its parameters bundled together.
///
/// This type makes it easier to pass a statement and its bind values around
/// as a single unit.
#[derive(Debug, Clone)]
pub struct QueryAndParams {
    /// The SQL text
    pub query: String,
    /// The parameters to be bound to the statement
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given SQL text and parameters.
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    /// Create a new `QueryAndParams` with no parameters.
    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }
}

/// A single read unit of work.
///
/// Execution is two-phase: the runner opens a cursor for [`statement`] and
/// then calls [`materialize`] exactly once with that cursor. The cursor never
/// outlives the runner's call frame, so implementations cannot leak it —
/// whatever `materialize` does not consume is released when the runner
/// returns, including on error.
///
/// [`statement`]: DbQuery::statement
/// [`materialize`]: DbQuery::materialize
pub trait DbQuery {
    /// The fully materialized result type.
    type Output;

    /// The SQL and bind parameters used to open the cursor.
    fn statement(&self) -> QueryAndParams;

    /// Convert the open cursor into the result.
    ///
    /// # Errors
    /// Returns an error if the cursor cannot be read or a row cannot be
    /// converted; the runner closes the cursor either way.
    fn materialize(&self, rows: &mut CursorRows<'_>) -> Result<Self::Output, StoreError>;
}
