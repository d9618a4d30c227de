//! Shared fixtures: a sample `User` entity, its mapper, and store setup.

#![allow(dead_code)]

use std::sync::Arc;

use messenger_store::prelude::*;

pub const USERS_DDL: &str = "CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    online INTEGER NOT NULL DEFAULT 0,
    version INTEGER NOT NULL DEFAULT 0
)";

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub online: bool,
    pub version: i64,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            online: false,
            version: 0,
        }
    }
}

pub struct UserMapper;

impl EntityMapper for UserMapper {
    type Entity = User;

    fn id(&self, user: &User) -> String {
        user.id.clone()
    }

    fn to_row(&self, user: &User) -> Row {
        Row::new()
            .with("id", user.id.as_str())
            .with("name", user.name.as_str())
            .with("online", user.online)
            .with("version", user.version)
    }

    fn from_row(&self, row: &CursorRow) -> Result<User, StoreError> {
        let text = |col: &str| {
            row.get(col)
                .and_then(RowValues::as_text)
                .map(str::to_string)
                .ok_or_else(|| StoreError::Mapping(format!("users.{col} missing or not text")))
        };
        let int = |col: &str| {
            row.get(col)
                .and_then(RowValues::as_int)
                .copied()
                .ok_or_else(|| StoreError::Mapping(format!("users.{col} missing or not integer")))
        };
        Ok(User {
            id: text("id")?,
            name: text("name")?,
            online: row.get("online").and_then(RowValues::as_bool).copied() == Some(true),
            version: int("version")?,
        })
    }
}

pub fn memory_provider() -> Arc<ConnectionProvider> {
    let provider = Arc::new(ConnectionProvider::open_in_memory());
    provider.execute_batch_sql(USERS_DDL).expect("users schema");
    provider
}

pub fn users_dao(provider: &Arc<ConnectionProvider>) -> SqliteDao<UserMapper> {
    SqliteDao::new("users", "id", UserMapper, Arc::clone(provider))
}
