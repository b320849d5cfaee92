//! Escrow storage and the escrow lifecycle state machine.
//!
//! [`EscrowLedger`] owns every escrow keyed by [`EscrowId`]. Creation takes
//! a shared borrow of the [`PoolRegistry`] to check that the pool is live and
//! that the offered value meets its minimum stake; nothing here can mutate a
//! pool.
//!
//! All checks run before the first write, so a rejected call leaves the
//! ledger exactly as it was.

use std::collections::HashMap;

use chrono::Utc;

use super::escrow_entry::EscrowEntry;
use super::{EscrowId, PoolId, PoolRegistry, Principal};
use crate::error::LedgerError;

/// Optional filters for [`EscrowLedger::list`].
#[derive(Debug, Clone, Default)]
pub struct EscrowFilter {
    /// Only escrows pledged against this pool.
    pub pool_id: Option<PoolId>,
    /// Only escrows owned by this principal.
    pub owner: Option<Principal>,
}

impl EscrowFilter {
    fn matches(&self, entry: &EscrowEntry) -> bool {
        self.pool_id.is_none_or(|pool_id| entry.pool_id == pool_id)
            && self.owner.as_ref().is_none_or(|owner| entry.is_owned_by(owner))
    }
}

/// Central store for all escrows.
#[derive(Debug, Default)]
pub struct EscrowLedger {
    escrows: HashMap<EscrowId, EscrowEntry>,
}

impl EscrowLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            escrows: HashMap::new(),
        }
    }

    /// Opens an escrow for `caller` against `pool_id` with an initial
    /// balance of `value`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::KeyNotFound`] if `pool_id` is not a live pool.
    /// - [`LedgerError::InsufficientStake`] if `value` is below the pool's
    ///   minimum stake.
    pub fn create(
        &mut self,
        pools: &PoolRegistry,
        caller: &Principal,
        pool_id: PoolId,
        value: u128,
    ) -> Result<EscrowEntry, LedgerError> {
        let pool = pools.get(pool_id)?;
        if value < pool.min_stake {
            return Err(LedgerError::InsufficientStake {
                required: pool.min_stake,
                provided: value,
            });
        }

        let escrow_id = self.fresh_id();
        let entry = EscrowEntry::new(escrow_id, pool_id, caller.clone(), value);
        self.escrows.insert(escrow_id, entry.clone());
        Ok(entry)
    }

    /// Adds `value` to the balance of an escrow owned by `caller`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::KeyNotFound`] if `escrow_id` does not exist.
    /// - [`LedgerError::AddressUnauthorised`] if `caller` is not the owner.
    /// - [`LedgerError::BalanceOverflow`] if the new balance would not fit.
    pub fn deposit(
        &mut self,
        caller: &Principal,
        escrow_id: EscrowId,
        value: u128,
    ) -> Result<EscrowEntry, LedgerError> {
        let entry = self.owned_entry_mut(caller, escrow_id)?;
        let balance = entry
            .balance
            .checked_add(value)
            .ok_or(LedgerError::BalanceOverflow {
                balance: entry.balance,
                value,
            })?;

        entry.balance = balance;
        entry.last_modified_at = Utc::now();
        Ok(entry.clone())
    }

    /// Removes `amount` from the balance of an escrow owned by `caller`.
    ///
    /// Ownership is checked before the balance, so a non-owner is rejected
    /// with [`LedgerError::AddressUnauthorised`] whatever amount it asks for.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::KeyNotFound`] if `escrow_id` does not exist.
    /// - [`LedgerError::AddressUnauthorised`] if `caller` is not the owner.
    /// - [`LedgerError::InsufficientBalance`] if `amount` exceeds the balance.
    pub fn withdraw(
        &mut self,
        caller: &Principal,
        escrow_id: EscrowId,
        amount: u128,
    ) -> Result<EscrowEntry, LedgerError> {
        let entry = self.owned_entry_mut(caller, escrow_id)?;
        let balance = entry
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                requested: amount,
                available: entry.balance,
            })?;

        entry.balance = balance;
        entry.last_modified_at = Utc::now();
        Ok(entry.clone())
    }

    /// Looks up an escrow.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::KeyNotFound`] if no escrow has this ID.
    pub fn get(&self, escrow_id: EscrowId) -> Result<&EscrowEntry, LedgerError> {
        self.escrows
            .get(&escrow_id)
            .ok_or_else(|| LedgerError::KeyNotFound(escrow_id.to_string()))
    }

    /// Returns copies of all escrows matching `filter`, oldest first.
    #[must_use]
    pub fn list(&self, filter: &EscrowFilter) -> Vec<EscrowEntry> {
        let mut entries: Vec<EscrowEntry> = self
            .escrows
            .values()
            .filter(|entry| filter.matches(entry))
            .cloned()
            .collect();
        entries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.escrow_id.as_uuid().cmp(b.escrow_id.as_uuid()))
        });
        entries
    }

    /// Returns the number of escrows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.escrows.len()
    }

    /// Returns `true` if the ledger holds no escrows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.escrows.is_empty()
    }

    fn owned_entry_mut(
        &mut self,
        caller: &Principal,
        escrow_id: EscrowId,
    ) -> Result<&mut EscrowEntry, LedgerError> {
        let entry = self
            .escrows
            .get_mut(&escrow_id)
            .ok_or_else(|| LedgerError::KeyNotFound(escrow_id.to_string()))?;
        if !entry.is_owned_by(caller) {
            return Err(LedgerError::AddressUnauthorised(escrow_id.to_string()));
        }
        Ok(entry)
    }

    fn fresh_id(&self) -> EscrowId {
        loop {
            let id = EscrowId::new();
            if !self.escrows.contains_key(&id) {
                return id;
            }
        }
    }
}
