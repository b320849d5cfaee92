//! Type-safe pool identifier.
//!
//! [`PoolId`] is a newtype wrapper around [`uuid::Uuid`] (v4) providing
//! type safety so that pool identifiers cannot be confused with escrow
//! identifiers or other UUIDs.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for a stake pool.
///
/// Wraps a UUID v4. Generated once at pool creation time and immutable
/// thereafter. Used as the dictionary key in [`super::PoolRegistry`], the
/// back-reference held by every escrow, and the WebSocket subscription
/// target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PoolId(uuid::Uuid);

impl PoolId {
    /// Creates a new random `PoolId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `PoolId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for PoolId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for PoolId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<PoolId> for uuid::Uuid {
    fn from(id: PoolId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        let a = PoolId::new();
        let b = PoolId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_uuid_format() {
        let id = PoolId::new();
        let s = format!("{id}");
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn deserializes_from_uuid_string() {
        let uuid = uuid::Uuid::new_v4();
        let json = format!("\"{uuid}\"");
        let Ok(id) = serde_json::from_str::<PoolId>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn nil_uuid_is_a_valid_but_distinct_key() {
        let nil = PoolId::from_uuid(uuid::Uuid::nil());
        assert_ne!(nil, PoolId::new());
        assert_eq!(nil.to_string(), "00000000-0000-0000-0000-000000000000");
    }
}
