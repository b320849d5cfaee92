//! Pool record with server-side metadata.

use chrono::{DateTime, Utc};

use super::{PoolId, Principal};

/// A stake pool owned by the principal that created it.
///
/// `pool_id`, `owner` and `created_at` are immutable after creation. The
/// remaining configuration fields are replaced in place by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    /// Unique pool identifier.
    pub pool_id: PoolId,

    /// Non-empty display name.
    pub name: String,

    /// Free-form description, may be empty.
    pub description: String,

    /// Minimum value an escrow must carry when created against this pool.
    pub min_stake: u128,

    /// Principal allowed to update or delete the pool.
    pub owner: Principal,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last update.
    pub last_modified_at: DateTime<Utc>,
}

impl PoolEntry {
    /// Creates a new `PoolEntry` stamped with the current time.
    #[must_use]
    pub fn new(
        pool_id: PoolId,
        owner: Principal,
        name: String,
        description: String,
        min_stake: u128,
    ) -> Self {
        let now = Utc::now();
        Self {
            pool_id,
            name,
            description,
            min_stake,
            owner,
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
