//! Conversions between the store's value model and SQLite driver types,
//! plus the cursor wrapper handed to query units during materialization.

use std::collections::HashMap;
use std::sync::Arc;

use rusqlite::types::{Value, ValueRef};

use crate::error::StoreError;
use crate::row::CursorRow;
use crate::types::RowValues;

/// Bind store values to SQLite parameter types.
pub fn convert_params(params: &[RowValues]) -> Vec<Value> {
    let mut vec_values = Vec::with_capacity(params.len());
    for p in params {
        let v = match p {
            RowValues::Int(i) => Value::Integer(*i),
            RowValues::Float(f) => Value::Real(*f),
            RowValues::Text(s) => Value::Text(s.clone()),
            RowValues::Bool(b) => Value::Integer(i64::from(*b)),
            RowValues::Timestamp(dt) => {
                let formatted = dt.format("%F %T%.f").to_string();
                Value::Text(formatted)
            }
            RowValues::Null => Value::Null,
            RowValues::JSON(jsval) => Value::Text(jsval.to_string()),
            RowValues::Blob(bytes) => Value::Blob(bytes.clone()),
        };
        vec_values.push(v);
    }
    vec_values
}

fn extract_value(row: &rusqlite::Row, idx: usize) -> Result<RowValues, StoreError> {
    match row.get_ref(idx) {
        Err(e) => Err(StoreError::from(e)),
        Ok(ValueRef::Null) => Ok(RowValues::Null),
        Ok(ValueRef::Integer(i)) => Ok(RowValues::Int(i)),
        Ok(ValueRef::Real(f)) => Ok(RowValues::Float(f)),
        Ok(ValueRef::Text(bytes)) => {
            let s = String::from_utf8_lossy(bytes).into_owned();
            Ok(RowValues::Text(s))
        }
        Ok(ValueRef::Blob(b)) => Ok(RowValues::Blob(b.to_vec())),
    }
}

/// A live cursor over query results.
///
/// Only the query runner constructs one of these, and only for the duration
/// of a query unit's `materialize` call; the underlying statement and rows
/// are dropped when the runner returns, on every exit path.
pub struct CursorRows<'stmt> {
    rows: rusqlite::Rows<'stmt>,
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
}

impl<'stmt> CursorRows<'stmt> {
    pub(crate) fn new(rows: rusqlite::Rows<'stmt>, column_names: Vec<String>) -> Self {
        let column_index = Arc::new(
            column_names
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect::<HashMap<_, _>>(),
        );
        Self {
            rows,
            column_names: Arc::new(column_names),
            column_index,
        }
    }

    /// Advance the cursor and materialize the next row, if any.
    ///
    /// # Errors
    /// Returns an error if the engine fails to step the cursor or a column
    /// value cannot be read.
    pub fn next_row(&mut self) -> Result<Option<CursorRow>, StoreError> {
        let Some(row) = self.rows.next()? else {
            return Ok(None);
        };

        let mut values = Vec::with_capacity(self.column_names.len());
        for i in 0..self.column_names.len() {
            values.push(extract_value(row, i)?);
        }

        Ok(Some(CursorRow::new(
            self.column_names.clone(),
            self.column_index.clone(),
            values,
        )))
    }

    /// Drain the cursor, converting each row through `f`.
    ///
    /// # Errors
    /// Propagates the first cursor or conversion error; remaining rows are
    /// not visited.
    pub fn collect_with<T>(
        &mut self,
        mut f: impl FnMut(&CursorRow) -> Result<T, StoreError>,
    ) -> Result<Vec<T>, StoreError> {
        let mut out = Vec::new();
        while let Some(row) = self.next_row()? {
            out.push(f(&row)?);
        }
        Ok(out)
    }

    /// Column names of the open cursor, in select order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }
}
