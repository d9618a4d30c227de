use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// An ordered column→value mapping built by a mapper for a write.
///
/// Column order is preserved so the generated SQL binds parameters in a
/// stable order for a given entity type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, RowValues)>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column value, builder style.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RowValues>) -> Self {
        self.put(column, value);
        self
    }

    /// Add a column value.
    pub fn put(&mut self, column: impl Into<String>, value: impl Into<RowValues>) {
        self.columns.push((column.into(), value.into()));
    }

    /// Get a value by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RowValues> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &RowValues> {
        self.columns.iter().map(|(_, value)| value)
    }

    /// Consume the row into its (column, value) pairs.
    #[must_use]
    pub fn into_columns(self) -> Vec<(String, RowValues)> {
        self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One materialized row from an open cursor.
///
/// Column names and the name→index map are shared across every row of a
/// result via `Arc`, so per-row cost is just the values.
#[derive(Debug, Clone)]
pub struct CursorRow {
    column_names: Arc<Vec<String>>,
    column_index: Arc<HashMap<String, usize>>,
    values: Vec<RowValues>,
}

impl CursorRow {
    #[must_use]
    pub(crate) fn new(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<RowValues>,
    ) -> Self {
        Self {
            column_names,
            column_index,
            values,
        }
    }

    /// Get a value by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&RowValues> {
        self.column_index
            .get(column)
            .and_then(|&idx| self.values.get(idx))
    }

    /// Get a value by position.
    #[must_use]
    pub fn get_at(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    /// Column names, in select order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
