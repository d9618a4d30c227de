use crate::error::StoreError;
use crate::row::{CursorRow, Row};

/// Per-entity-type mapping contract between domain entities and table rows.
///
/// One stateless mapper exists per entity type, constructed once and shared
/// for the application's lifetime. The DAO never inspects entity internals;
/// every read and write goes through this contract, which is what keeps the
/// DAO generic.
///
/// Implementations must be total and deterministic: `from_row` never fails
/// on a row produced by this mapper's own `to_row`, and the same entity
/// always serializes to the same row. The identifier column must appear in
/// every row `to_row` produces.
pub trait EntityMapper {
    /// The domain entity this mapper handles.
    type Entity;

    /// The entity's stable, string-valued identifier.
    fn id(&self, entity: &Self::Entity) -> String;

    /// Serialize the entity into a column→value row for a write.
    fn to_row(&self, entity: &Self::Entity) -> Row;

    /// Reconstruct an entity from one cursor row.
    ///
    /// # Errors
    /// Returns [`StoreError::Mapping`] when the row cannot be converted back
    /// into an entity (schema drift); the failure surfaces to the caller,
    /// never silently skipped.
    fn from_row(&self, row: &CursorRow) -> Result<Self::Entity, StoreError>;
}
