//! Convenient imports for common functionality.
//!
//! Re-exports the types most callers need to define a mapper and drive a DAO.

pub use crate::dao::{DeleteAllRows, SqliteDao};
pub use crate::entity::EntityId;
pub use crate::error::StoreError;
pub use crate::exec::{DbExec, FnExec};
pub use crate::mapper::EntityMapper;
pub use crate::provider::{ConnectionProvider, StoreConfig};
pub use crate::query::{DbQuery, QueryAndParams};
pub use crate::row::{CursorRow, Row};
pub use crate::sqlite::CursorRows;
pub use crate::types::RowValues;
