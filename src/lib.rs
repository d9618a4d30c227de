//! Generic transactional data-access layer for the messenger's embedded
//! SQLite store.
//!
//! Domain services (users, chats, messages, accounts) persist their entities
//! through a table-scoped [`SqliteDao`], parameterized by an
//! [`EntityMapper`] that serializes entities to rows and back. Writes run as
//! single-use [`DbExec`] units — standalone or batched under one
//! all-or-nothing transaction — and reads run as [`DbQuery`] units whose
//! cursor never escapes the runner.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use messenger_store::prelude::*;
//!
//! struct User { id: String, name: String }
//!
//! struct UserMapper;
//!
//! impl EntityMapper for UserMapper {
//!     type Entity = User;
//!
//!     fn id(&self, user: &User) -> String {
//!         user.id.clone()
//!     }
//!
//!     fn to_row(&self, user: &User) -> Row {
//!         Row::new().with("id", user.id.as_str()).with("name", user.name.as_str())
//!     }
//!
//!     fn from_row(&self, row: &CursorRow) -> Result<User, StoreError> {
//!         let text = |col: &str| {
//!             row.get(col)
//!                 .and_then(RowValues::as_text)
//!                 .map(str::to_string)
//!                 .ok_or_else(|| StoreError::Mapping(format!("users.{col} missing")))
//!         };
//!         Ok(User { id: text("id")?, name: text("name")? })
//!     }
//! }
//!
//! fn main() -> Result<(), StoreError> {
//!     let provider = Arc::new(ConnectionProvider::new(StoreConfig::file("messenger.db")));
//!     provider.execute_batch_sql("CREATE TABLE IF NOT EXISTS users (id TEXT PRIMARY KEY, name TEXT NOT NULL)")?;
//!
//!     let users = SqliteDao::new("users", "id", UserMapper, provider);
//!     users.create(&User { id: "vk_user01".into(), name: "Alice".into() })?;
//!     let loaded = users.read("vk_user01")?;
//!     # let _ = loaded;
//!     Ok(())
//! }
//! ```

pub use rusqlite;

mod dao;
mod entity;
mod error;
mod exec;
mod executor;
mod mapper;
mod provider;
mod query;
mod row;
mod sqlite;
mod types;

pub mod prelude;

pub use dao::{DeleteAllRows, SqliteDao};
pub use entity::EntityId;
pub use error::StoreError;
pub use exec::{DbExec, FnExec};
pub use mapper::EntityMapper;
pub use provider::{ConnectionProvider, StoreConfig};
pub use query::{DbQuery, QueryAndParams};
pub use row::{CursorRow, Row};
pub use sqlite::{CursorRows, convert_params};
pub use types::RowValues;
