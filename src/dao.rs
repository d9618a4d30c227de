use std::sync::Arc;

use rusqlite::Connection;

use crate::error::StoreError;
use crate::exec::DbExec;
use crate::mapper::EntityMapper;
use crate::provider::ConnectionProvider;
use crate::query::{DbQuery, QueryAndParams};
use crate::row::Row;
use crate::sqlite::{CursorRows, convert_params};
use crate::types::RowValues;

/// Table-scoped CRUD facade over one entity type.
///
/// Constructed from a table name, the identifier column's name, and the
/// entity's mapper; every operation composes short-lived exec/query units
/// and submits them through the shared [`ConnectionProvider`]. The DAO
/// itself is stateless between calls.
pub struct SqliteDao<M: EntityMapper> {
    table: String,
    id_column: String,
    mapper: M,
    provider: Arc<ConnectionProvider>,
}

impl<M: EntityMapper> SqliteDao<M> {
    pub fn new(
        table: impl Into<String>,
        id_column: impl Into<String>,
        mapper: M,
        provider: Arc<ConnectionProvider>,
    ) -> Self {
        Self {
            table: table.into(),
            id_column: id_column.into(),
            mapper,
            provider,
        }
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Insert the entity and return its generated row id.
    ///
    /// Uniqueness is not pre-checked; a duplicate identifier surfaces as
    /// [`StoreError::Constraint`] from the identifier column's constraint.
    ///
    /// # Errors
    /// Returns [`StoreError::Constraint`] on a rejected insert, or any other
    /// engine error unwrapped.
    pub fn create(&self, entity: &M::Entity) -> Result<i64, StoreError> {
        self.provider.run_exec(&InsertEntity { dao: self, entity })
    }

    /// Load the entity stored under `id`, or `None` if there is no match.
    ///
    /// # Errors
    /// Returns [`StoreError::Mapping`] if the stored row cannot be converted
    /// back into an entity.
    pub fn read(&self, id: &str) -> Result<Option<M::Entity>, StoreError> {
        let entities = self.provider.run_query(&LoadEntities {
            dao: self,
            id: Some(id),
        })?;
        Ok(entities.into_iter().next())
    }

    /// Load every entity in the table, in store order. An empty table yields
    /// an empty vec, not an error.
    ///
    /// # Errors
    /// Returns [`StoreError::Mapping`] on the first row that cannot be
    /// converted; no partial result is returned.
    pub fn read_all(&self) -> Result<Vec<M::Entity>, StoreError> {
        self.provider.run_query(&LoadEntities { dao: self, id: None })
    }

    /// Update the row whose identifier matches the entity's, returning the
    /// affected-row count. A missing identifier is a no-op with count 0; the
    /// caller decides whether that is an error.
    ///
    /// # Errors
    /// Returns the engine's error on a rejected update.
    pub fn update(&self, entity: &M::Entity) -> Result<i64, StoreError> {
        self.provider.run_exec(&UpdateEntity { dao: self, entity })
    }

    /// Delete the row storing this entity.
    ///
    /// # Errors
    /// Returns the engine's error on failure.
    pub fn delete(&self, entity: &M::Entity) -> Result<(), StoreError> {
        self.delete_by_id(&self.mapper.id(entity))
    }

    /// Delete the row stored under `id`. Deleting a missing id is a no-op.
    ///
    /// # Errors
    /// Returns the engine's error on failure.
    pub fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.provider.run_exec(&DeleteById { dao: self, id })?;
        Ok(())
    }

    /// Delete every row in the table, as a one-unit batch for consistency
    /// with other mutating calls.
    ///
    /// # Errors
    /// Returns [`StoreError::TransactionAborted`] if the delete fails.
    pub fn delete_all(&self) -> Result<(), StoreError> {
        let unit = DeleteAllRows { table: &self.table };
        self.provider.run_batch(&[&unit])
    }

    fn where_id_equals(&self, param_index: usize) -> String {
        format!("{} = ?{param_index}", self.id_column)
    }
}

struct InsertEntity<'a, M: EntityMapper> {
    dao: &'a SqliteDao<M>,
    entity: &'a M::Entity,
}

impl<M: EntityMapper> DbExec for InsertEntity<'_, M> {
    fn exec(&self, conn: &Connection) -> Result<i64, StoreError> {
        let row = self.dao.mapper.to_row(self.entity);
        let sql = insert_sql(&self.dao.table, &row);
        let params = convert_params(&row.values().cloned().collect::<Vec<_>>());
        conn.execute(&sql, rusqlite::params_from_iter(params))?;
        Ok(conn.last_insert_rowid())
    }
}

struct UpdateEntity<'a, M: EntityMapper> {
    dao: &'a SqliteDao<M>,
    entity: &'a M::Entity,
}

impl<M: EntityMapper> DbExec for UpdateEntity<'_, M> {
    fn exec(&self, conn: &Connection) -> Result<i64, StoreError> {
        let row = self.dao.mapper.to_row(self.entity);
        let assignments = row
            .column_names()
            .enumerate()
            .map(|(i, name)| format!("{name} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.dao.table,
            assignments,
            self.dao.where_id_equals(row.len() + 1),
        );
        let mut params = convert_params(&row.values().cloned().collect::<Vec<_>>());
        params.push(rusqlite::types::Value::Text(self.dao.mapper.id(self.entity)));
        let affected = conn.execute(&sql, rusqlite::params_from_iter(params))?;
        Ok(affected as i64)
    }
}

struct DeleteById<'a, M: EntityMapper> {
    dao: &'a SqliteDao<M>,
    id: &'a str,
}

impl<M: EntityMapper> DbExec for DeleteById<'_, M> {
    fn exec(&self, conn: &Connection) -> Result<i64, StoreError> {
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            self.dao.table,
            self.dao.where_id_equals(1)
        );
        let affected = conn.execute(&sql, rusqlite::params![self.id])?;
        Ok(affected as i64)
    }
}

/// Standalone unit clearing one table; usable in service-layer batches too.
pub struct DeleteAllRows<'a> {
    pub table: &'a str,
}

impl DbExec for DeleteAllRows<'_> {
    fn exec(&self, conn: &Connection) -> Result<i64, StoreError> {
        let affected = conn.execute(&format!("DELETE FROM {}", self.table), [])?;
        Ok(affected as i64)
    }
}

struct LoadEntities<'a, M: EntityMapper> {
    dao: &'a SqliteDao<M>,
    id: Option<&'a str>,
}

impl<M: EntityMapper> DbQuery for LoadEntities<'_, M> {
    type Output = Vec<M::Entity>;

    fn statement(&self) -> QueryAndParams {
        match self.id {
            Some(id) => QueryAndParams::new(
                format!(
                    "SELECT * FROM {} WHERE {}",
                    self.dao.table,
                    self.dao.where_id_equals(1)
                ),
                vec![RowValues::Text(id.to_string())],
            ),
            None => QueryAndParams::new_without_params(format!("SELECT * FROM {}", self.dao.table)),
        }
    }

    fn materialize(&self, rows: &mut CursorRows<'_>) -> Result<Self::Output, StoreError> {
        rows.collect_with(|row| self.dao.mapper.from_row(row))
    }
}

fn insert_sql(table: &str, row: &Row) -> String {
    let columns = row.column_names().collect::<Vec<_>>().join(", ");
    let placeholders = (1..=row.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {table} ({columns}) VALUES ({placeholders})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_sql_binds_columns_in_row_order() {
        let row = Row::new().with("id", "u1").with("name", "Alice");
        assert_eq!(
            insert_sql("users", &row),
            "INSERT INTO users (id, name) VALUES (?1, ?2)"
        );
    }
}
