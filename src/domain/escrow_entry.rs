//! Escrow record: a balance pledged against a pool.

use chrono::{DateTime, Utc};

use super::{EscrowId, PoolId, Principal};

/// A per-user balance pledged against a pool.
///
/// `pool_id` is a non-owning back-reference: it is checked once at creation
/// and never used to reach into the pool afterwards, so the escrow stays
/// operable if the pool is later deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscrowEntry {
    /// Unique escrow identifier.
    pub escrow_id: EscrowId,

    /// Pool the escrow was created against.
    pub pool_id: PoolId,

    /// Principal allowed to deposit and withdraw.
    pub owner: Principal,

    /// Current balance in stake units.
    pub balance: u128,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last deposit or withdrawal.
    pub last_modified_at: DateTime<Utc>,
}

impl EscrowEntry {
    /// Creates a new `EscrowEntry` stamped with the current time.
    #[must_use]
    pub fn new(escrow_id: EscrowId, pool_id: PoolId, owner: Principal, balance: u128) -> Self {
        let now = Utc::now();
        Self {
            escrow_id,
            pool_id,
            owner,
            balance,
            created_at: now,
            last_modified_at: now,
        }
    }

    /// Returns `true` if `caller` is the recorded owner.
    #[must_use]
    pub fn is_owned_by(&self, caller: &Principal) -> bool {
        self.owner == *caller
    }
}
