//! Composition of the pool registry and the escrow ledger.
//!
//! [`Ledger`] is the whole state machine: it owns both components and is
//! the only place where the escrow ledger is handed a read-only view of the
//! pools. Each method validates, applies and returns the
//! [`LedgerEvent`] that signals the mutation, or fails with no effect.

use super::escrow_entry::EscrowEntry;
use super::escrow_ledger::EscrowFilter;
use super::pool_entry::PoolEntry;
use super::{EscrowId, EscrowLedger, LedgerEvent, PoolId, PoolRegistry, Principal};
use crate::error::LedgerError;

/// Pools and escrows under one transaction boundary.
#[derive(Debug, Default)]
pub struct Ledger {
    pools: PoolRegistry,
    escrows: EscrowLedger,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the pool registry.
    #[must_use]
    pub fn pools(&self) -> &PoolRegistry {
        &self.pools
    }

    /// Read access to the escrow ledger.
    #[must_use]
    pub fn escrows(&self) -> &EscrowLedger {
        &self.escrows
    }

    /// See [`PoolRegistry::create`].
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyString`] if `name` is empty.
    pub fn create_pool(
        &mut self,
        caller: &Principal,
        name: String,
        description: String,
        min_stake: u128,
    ) -> Result<(PoolEntry, LedgerEvent), LedgerError> {
        let entry = self.pools.create(caller, name, description, min_stake)?;
        let event = LedgerEvent::pool_created(&entry);
        Ok((entry, event))
    }

    /// See [`PoolRegistry::update`].
    ///
    /// # Errors
    ///
    /// `KeyNotFound`, `AddressUnauthorised` or `EmptyString`, in that order.
    pub fn update_pool(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        name: String,
        description: String,
        min_stake: u128,
    ) -> Result<(PoolEntry, LedgerEvent), LedgerError> {
        let entry = self
            .pools
            .update(caller, pool_id, name, description, min_stake)?;
        let event = LedgerEvent::pool_updated(&entry);
        Ok((entry, event))
    }

    /// See [`PoolRegistry::delete`].
    ///
    /// # Errors
    ///
    /// `KeyNotFound` or `AddressUnauthorised`.
    pub fn delete_pool(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
    ) -> Result<(PoolEntry, LedgerEvent), LedgerError> {
        let entry = self.pools.delete(caller, pool_id)?;
        let event = LedgerEvent::pool_deleted(&entry);
        Ok((entry, event))
    }

    /// See [`EscrowLedger::create`].
    ///
    /// # Errors
    ///
    /// `KeyNotFound` or `InsufficientStake`.
    pub fn create_escrow(
        &mut self,
        caller: &Principal,
        pool_id: PoolId,
        value: u128,
    ) -> Result<(EscrowEntry, LedgerEvent), LedgerError> {
        let entry = self.escrows.create(&self.pools, caller, pool_id, value)?;
        let event = LedgerEvent::escrow_created(&entry);
        Ok((entry, event))
    }

    /// See [`EscrowLedger::deposit`].
    ///
    /// # Errors
    ///
    /// `KeyNotFound`, `AddressUnauthorised` or `BalanceOverflow`.
    pub fn deposit_escrow(
        &mut self,
        caller: &Principal,
        escrow_id: EscrowId,
        value: u128,
    ) -> Result<(EscrowEntry, LedgerEvent), LedgerError> {
        let entry = self.escrows.deposit(caller, escrow_id, value)?;
        let event = LedgerEvent::escrow_deposited(&entry, value);
        Ok((entry, event))
    }

    /// See [`EscrowLedger::withdraw`].
    ///
    /// # Errors
    ///
    /// `KeyNotFound`, `AddressUnauthorised` or `InsufficientBalance`.
    pub fn withdraw_escrow(
        &mut self,
        caller: &Principal,
        escrow_id: EscrowId,
        amount: u128,
    ) -> Result<(EscrowEntry, LedgerEvent), LedgerError> {
        let entry = self.escrows.withdraw(caller, escrow_id, amount)?;
        let event = LedgerEvent::escrow_withdrawn(&entry, amount);
        Ok((entry, event))
    }

    /// Returns a copy of a live pool.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::KeyNotFound`] if the pool is not live.
    pub fn pool(&self, pool_id: PoolId) -> Result<PoolEntry, LedgerError> {
        self.pools.get(pool_id).cloned()
    }

    /// Returns a copy of an escrow and whether its pool is still live.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::KeyNotFound`] if the escrow does not exist.
    pub fn escrow(&self, escrow_id: EscrowId) -> Result<(EscrowEntry, bool), LedgerError> {
        let entry = self.escrows.get(escrow_id)?.clone();
        let pool_live = self.pools.contains(entry.pool_id);
        Ok((entry, pool_live))
    }

    /// Lists pools, optionally by owner.
    #[must_use]
    pub fn list_pools(&self, owner: Option<&Principal>) -> Vec<PoolEntry> {
        self.pools.list(owner)
    }

    /// Lists escrows matching `filter`.
    #[must_use]
    pub fn list_escrows(&self, filter: &EscrowFilter) -> Vec<EscrowEntry> {
        self.escrows.list(filter)
    }
}
