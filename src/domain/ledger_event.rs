//! Domain events reflecting ledger state mutations.
//!
//! Every successful operation emits exactly one [`LedgerEvent`] through the
//! [`super::EventBus`]. Events are the only external record of a mutation:
//! they are broadcast to WebSocket subscribers and their fields follow a
//! fixed positional order, exposed by [`LedgerEvent::args`].

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::escrow_entry::EscrowEntry;
use super::pool_entry::PoolEntry;
use super::{EscrowId, PoolId, Principal};

/// Serializes a `u128` amount as a decimal string to keep full precision
/// in JSON.
fn amount_as_string<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(amount)
}

/// Domain event emitted after every successful ledger mutation.
///
/// Field declaration order is the positional order of [`Self::args`];
/// `timestamp` is envelope metadata and not part of the arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A pool was created.
    CreatePool {
        /// Pool identifier.
        pool_id: PoolId,
        /// Creating principal, now the owner.
        owner: Principal,
        /// Pool name.
        name: String,
        /// Pool description.
        description: String,
        /// Minimum stake (string-encoded u128).
        #[serde(serialize_with = "amount_as_string")]
        min_stake: u128,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A pool's configuration was replaced.
    UpdatePool {
        /// Pool identifier.
        pool_id: PoolId,
        /// Pool owner.
        owner: Principal,
        /// New name.
        name: String,
        /// New description.
        description: String,
        /// New minimum stake (string-encoded u128).
        #[serde(serialize_with = "amount_as_string")]
        min_stake: u128,
        /// Update timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A pool was removed.
    DeletePool {
        /// Pool identifier.
        pool_id: PoolId,
        /// Owner that removed it.
        owner: Principal,
        /// Removal timestamp.
        timestamp: DateTime<Utc>,
    },

    /// An escrow was opened against a pool.
    CreateEscrow {
        /// Escrow identifier.
        escrow_id: EscrowId,
        /// Creating principal, now the owner.
        owner: Principal,
        /// Pool the escrow is pledged against.
        pool_id: PoolId,
        /// Initial balance (string-encoded u128).
        #[serde(serialize_with = "amount_as_string")]
        balance: u128,
        /// Creation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Value was deposited into an escrow.
    DepositEscrow {
        /// Escrow identifier.
        escrow_id: EscrowId,
        /// Escrow owner.
        owner: Principal,
        /// Pool the escrow is pledged against.
        pool_id: PoolId,
        /// Deposited value (string-encoded u128).
        #[serde(serialize_with = "amount_as_string")]
        value: u128,
        /// Balance after the deposit (string-encoded u128).
        #[serde(serialize_with = "amount_as_string")]
        balance: u128,
        /// Deposit timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Value was withdrawn from an escrow.
    WithdrawEscrow {
        /// Escrow identifier.
        escrow_id: EscrowId,
        /// Escrow owner.
        owner: Principal,
        /// Pool the escrow is pledged against.
        pool_id: PoolId,
        /// Withdrawn amount (string-encoded u128).
        #[serde(serialize_with = "amount_as_string")]
        amount: u128,
        /// Balance after the withdrawal (string-encoded u128).
        #[serde(serialize_with = "amount_as_string")]
        balance: u128,
        /// Withdrawal timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// Builds a [`Self::CreatePool`] from a freshly stored pool.
    #[must_use]
    pub fn pool_created(entry: &PoolEntry) -> Self {
        Self::CreatePool {
            pool_id: entry.pool_id,
            owner: entry.owner.clone(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            min_stake: entry.min_stake,
            timestamp: entry.created_at,
        }
    }

    /// Builds a [`Self::UpdatePool`] from the updated pool.
    #[must_use]
    pub fn pool_updated(entry: &PoolEntry) -> Self {
        Self::UpdatePool {
            pool_id: entry.pool_id,
            owner: entry.owner.clone(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            min_stake: entry.min_stake,
            timestamp: entry.last_modified_at,
        }
    }

    /// Builds a [`Self::DeletePool`] from the removed pool.
    #[must_use]
    pub fn pool_deleted(entry: &PoolEntry) -> Self {
        Self::DeletePool {
            pool_id: entry.pool_id,
            owner: entry.owner.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Builds a [`Self::CreateEscrow`] from a freshly stored escrow.
    #[must_use]
    pub fn escrow_created(entry: &EscrowEntry) -> Self {
        Self::CreateEscrow {
            escrow_id: entry.escrow_id,
            owner: entry.owner.clone(),
            pool_id: entry.pool_id,
            balance: entry.balance,
            timestamp: entry.created_at,
        }
    }

    /// Builds a [`Self::DepositEscrow`] from the escrow after a deposit.
    #[must_use]
    pub fn escrow_deposited(entry: &EscrowEntry, value: u128) -> Self {
        Self::DepositEscrow {
            escrow_id: entry.escrow_id,
            owner: entry.owner.clone(),
            pool_id: entry.pool_id,
            value,
            balance: entry.balance,
            timestamp: entry.last_modified_at,
        }
    }

    /// Builds a [`Self::WithdrawEscrow`] from the escrow after a withdrawal.
    #[must_use]
    pub fn escrow_withdrawn(entry: &EscrowEntry, amount: u128) -> Self {
        Self::WithdrawEscrow {
            escrow_id: entry.escrow_id,
            owner: entry.owner.clone(),
            pool_id: entry.pool_id,
            amount,
            balance: entry.balance,
            timestamp: entry.last_modified_at,
        }
    }

    /// Returns the pool ID associated with this event.
    ///
    /// For escrow events this is the pool the escrow was pledged against.
    #[must_use]
    pub fn pool_id(&self) -> PoolId {
        match self {
            Self::CreatePool { pool_id, .. }
            | Self::UpdatePool { pool_id, .. }
            | Self::DeletePool { pool_id, .. }
            | Self::CreateEscrow { pool_id, .. }
            | Self::DepositEscrow { pool_id, .. }
            | Self::WithdrawEscrow { pool_id, .. } => *pool_id,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::CreatePool { .. } => "create_pool",
            Self::UpdatePool { .. } => "update_pool",
            Self::DeletePool { .. } => "delete_pool",
            Self::CreateEscrow { .. } => "create_escrow",
            Self::DepositEscrow { .. } => "deposit_escrow",
            Self::WithdrawEscrow { .. } => "withdraw_escrow",
        }
    }

    /// Returns the event arguments in positional order.
    ///
    /// Identifiers and principals are strings; amounts are decimal strings.
    /// For [`Self::CreateEscrow`] the balance is at index 3.
    #[must_use]
    pub fn args(&self) -> Vec<serde_json::Value> {
        use serde_json::Value;

        fn text(v: &dyn std::fmt::Display) -> Value {
            Value::String(v.to_string())
        }

        match self {
            Self::CreatePool {
                pool_id,
                owner,
                name,
                description,
                min_stake,
                ..
            }
            | Self::UpdatePool {
                pool_id,
                owner,
                name,
                description,
                min_stake,
                ..
            } => vec![
                text(pool_id),
                text(owner),
                Value::String(name.clone()),
                Value::String(description.clone()),
                text(min_stake),
            ],
            Self::DeletePool { pool_id, owner, .. } => vec![text(pool_id), text(owner)],
            Self::CreateEscrow {
                escrow_id,
                owner,
                pool_id,
                balance,
                ..
            } => vec![text(escrow_id), text(owner), text(pool_id), text(balance)],
            Self::DepositEscrow {
                escrow_id,
                owner,
                pool_id,
                value: amount,
                balance,
                ..
            }
            | Self::WithdrawEscrow {
                escrow_id,
                owner,
                pool_id,
                amount,
                balance,
                ..
            } => vec![
                text(escrow_id),
                text(owner),
                text(pool_id),
                text(amount),
                text(balance),
            ],
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn escrow() -> EscrowEntry {
        EscrowEntry::new(
            EscrowId::new(),
            PoolId::new(),
            Principal::from("user"),
            1_050_975_209,
        )
    }

    #[test]
    fn create_escrow_balance_is_fourth_arg() {
        let event = LedgerEvent::escrow_created(&escrow());
        let args = event.args();
        assert_eq!(args.len(), 4);
        assert_eq!(
            args.get(3),
            Some(&serde_json::Value::String("1050975209".to_string()))
        );
        assert_eq!(
            args.get(1),
            Some(&serde_json::Value::String("user".to_string()))
        );
    }

    #[test]
    fn create_pool_args_follow_declared_order() {
        let pool = PoolEntry::new(
            PoolId::new(),
            Principal::from("pool-admin"),
            "Lorem Ipsum".to_string(),
            "lorem ipsum".to_string(),
            7,
        );
        let event = LedgerEvent::pool_created(&pool);
        let args = event.args();
        assert_eq!(args.first(), Some(&serde_json::Value::String(pool.pool_id.to_string())));
        assert_eq!(
            args.get(2),
            Some(&serde_json::Value::String("Lorem Ipsum".to_string()))
        );
        assert_eq!(args.get(4), Some(&serde_json::Value::String("7".to_string())));
        assert_eq!(event.event_type_str(), "create_pool");
    }

    #[test]
    fn escrow_events_carry_their_pool_id() {
        let entry = escrow();
        let event = LedgerEvent::escrow_withdrawn(&entry, 3);
        assert_eq!(event.pool_id(), entry.pool_id);
    }

    #[test]
    fn deposit_serializes_amounts_as_strings() {
        let event = LedgerEvent::escrow_deposited(&escrow(), 1);
        let Ok(json) = serde_json::to_value(&event) else {
            panic!("serialization failed");
        };
        assert_eq!(json.get("event_type"), Some(&serde_json::json!("deposit_escrow")));
        assert_eq!(json.get("value"), Some(&serde_json::json!("1")));
        assert_eq!(json.get("balance"), Some(&serde_json::json!("1050975209")));
    }
}
