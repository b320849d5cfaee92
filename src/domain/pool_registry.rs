//! Pool storage and the pool lifecycle state machine.
//!
//! [`PoolRegistry`] owns every live pool keyed by [`PoolId`]. It validates
//! and applies create / update / delete on behalf of a caller and offers
//! read-only lookups to the escrow ledger. It is deliberately synchronous:
//! the transaction boundary lives in [`crate::service::LedgerService`].
//!
//! Check order for mutations on an existing pool is existence, then
//! ownership, then field validation. A missing pool therefore always reports
//! [`LedgerError::KeyNotFound`], whoever the caller is.

use std::collections::HashMap;

use chrono::Utc;

use super::pool_entry::PoolEntry;
use super::{PoolId, Principal};
use crate::error::LedgerError;

/// Central store for all live pools.
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: HashMap<PoolId, PoolEntry>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
        }
    }

    /// Creates a pool owned by `caller` and returns a copy of the stored
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyString`] if `name` is empty.
    pub fn create(
        &mut self,
        caller: &Principal,
        name: String,
        description: String,
        min_stake: u128,
    ) -> Result<PoolEntry, LedgerError> {
        if name.is_empty() {
            return Err(LedgerError::EmptyString);
        }

        let pool_id = self.fresh_id();
        let entry = PoolEntry::new(pool_id, caller.clone(), name, description, min_stake);
        self.pools.insert(pool_id, entry.clone());
        Ok(entry)
    }

    /// Replaces name, description and minimum stake of an existing pool.
    ///
    /// Returns a copy of the updated entry; `pool_id` and `owner` are
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::KeyNotFound`] if `pool_id` is not live.
    /// - [`LedgerError::AddressUnauthorised`] if `caller` is not the owner.
    /// - [`LedgerError::EmptyString`] if `name` is empty.
    pub fn update(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        name: String,
        description: String,
        min_stake: u128,
    ) -> Result<PoolEntry, LedgerError> {
        let entry = self
            .pools
            .get_mut(&pool_id)
            .ok_or_else(|| LedgerError::KeyNotFound(pool_id.to_string()))?;
        if !entry.is_owned_by(caller) {
            return Err(LedgerError::AddressUnauthorised(pool_id.to_string()));
        }
        if name.is_empty() {
            return Err(LedgerError::EmptyString);
        }

        entry.name = name;
        entry.description = description;
        entry.min_stake = min_stake;
        entry.last_modified_at = Utc::now();
        Ok(entry.clone())
    }

    /// Removes a pool, returning its final entry.
    ///
    /// Escrows created against the pool are not touched.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::KeyNotFound`] if `pool_id` is not live.
    /// - [`LedgerError::AddressUnauthorised`] if `caller` is not the owner.
    pub fn delete(&mut self, caller: &Principal, pool_id: PoolId) -> Result<PoolEntry, LedgerError> {
        let entry = self.get(pool_id)?;
        if !entry.is_owned_by(caller) {
            return Err(LedgerError::AddressUnauthorised(pool_id.to_string()));
        }
        self.pools
            .remove(&pool_id)
            .ok_or_else(|| LedgerError::KeyNotFound(pool_id.to_string()))
    }

    /// Looks up a live pool.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::KeyNotFound`] if no live pool has this ID.
    pub fn get(&self, pool_id: PoolId) -> Result<&PoolEntry, LedgerError> {
        self.pools
            .get(&pool_id)
            .ok_or_else(|| LedgerError::KeyNotFound(pool_id.to_string()))
    }

    /// Returns `true` if `pool_id` resolves to a live pool.
    #[must_use]
    pub fn contains(&self, pool_id: PoolId) -> bool {
        self.pools.contains_key(&pool_id)
    }

    /// Returns copies of all live pools, optionally filtered by owner,
    /// oldest first.
    #[must_use]
    pub fn list(&self, owner_filter: Option<&Principal>) -> Vec<PoolEntry> {
        let mut entries: Vec<PoolEntry> = self
            .pools
            .values()
            .filter(|entry| owner_filter.is_none_or(|owner| entry.is_owned_by(owner)))
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.pool_id.as_uuid().cmp(b.pool_id.as_uuid()))
        });
        entries
    }

    /// Returns the number of live pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if the registry contains no pools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Draws UUIDs until one is not held by a live pool.
    fn fresh_id(&self) -> PoolId {
        loop {
            let id = PoolId::new();
            if !self.pools.contains_key(&id) {
                return id;
            }
        }
    }
}
