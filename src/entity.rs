use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Realm-scoped entity identity.
///
/// Every user, chat, and message lives in exactly one realm, and its stored
/// identifier is the canonical form `"<realm>_<realm_entity>"` — the realm
/// id, an underscore, then the realm's own id for the entity. The realm id
/// itself must not contain an underscore; the realm-entity part may.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    realm: String,
    realm_entity: String,
}

impl EntityId {
    pub fn new(realm: impl Into<String>, realm_entity: impl Into<String>) -> Self {
        Self {
            realm: realm.into(),
            realm_entity: realm_entity.into(),
        }
    }

    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    #[must_use]
    pub fn realm_entity(&self) -> &str {
        &self.realm_entity
    }

    /// The canonical stored form, `"<realm>_<realm_entity>"`.
    #[must_use]
    pub fn as_string(&self) -> String {
        format!("{}_{}", self.realm, self.realm_entity)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.realm, self.realm_entity)
    }
}

impl FromStr for EntityId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('_') {
            Some((realm, realm_entity)) if !realm.is_empty() && !realm_entity.is_empty() => {
                Ok(Self::new(realm, realm_entity))
            }
            _ => Err(StoreError::Mapping(format!(
                "invalid entity id {s:?}: expected <realm>_<realm_entity>"
            ))),
        }
    }
}

impl TryFrom<String> for EntityId {
    type Error = StoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.as_string()
    }
}
