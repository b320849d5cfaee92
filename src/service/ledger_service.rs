//! Ledger service: serializes operations and emits events.

use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::domain::{
    EscrowEntry, EscrowFilter, EscrowId, EventBus, Ledger, PoolEntry, PoolId,
    Principal,
};
use crate::error::{GatewayError, LedgerError};

/// Entity counts reported by the health endpoint.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct LedgerStats {
    /// Number of live pools.
    pub pools: usize,
    /// Number of escrows, including those whose pool was deleted.
    pub escrows: usize,
}

/// Orchestration layer for all ledger operations.
///
/// Owns the [`Ledger`] behind a single async `RwLock` and the
/// [`EventBus`]. Every mutation follows the pattern: acquire write lock →
/// validate and apply → publish event → release. The event is published
/// while the lock is held, so bus order equals commit order. Reads take
/// the read lock and return copies.
#[derive(Debug)]
pub struct LedgerService {
    ledger: RwLock<Ledger>,
    event_bus: EventBus,
}

impl LedgerService {
    /// Creates a new `LedgerService` over an empty ledger.
    #[must_use]
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            ledger: RwLock::new(Ledger::new()),
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Creates a pool owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyString`] (wrapped) if `name` is empty.
    pub async fn create_pool(
        &self,
        caller: &Principal,
        name: String,
        description: String,
        min_stake: u128,
    ) -> Result<PoolEntry, GatewayError> {
        let mut ledger = self.ledger.write().await;
        let (entry, event) = ledger
            .create_pool(caller, name, description, min_stake)
            .inspect_err(|err| rejected("create_pool", caller, err))?;
        let _ = self.event_bus.publish(event);

        tracing::info!(pool_id = %entry.pool_id, owner = %entry.owner, min_stake = %entry.min_stake, "pool created");
        Ok(entry)
    }

    /// Replaces a pool's name, description and minimum stake.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound`, `AddressUnauthorised` or `EmptyString`.
    pub async fn update_pool(
        &self,
        caller: &Principal,
        pool_id: PoolId,
        name: String,
        description: String,
        min_stake: u128,
    ) -> Result<PoolEntry, GatewayError> {
        let mut ledger = self.ledger.write().await;
        let (entry, event) = ledger
            .update_pool(caller, pool_id, name, description, min_stake)
            .inspect_err(|err| rejected("update_pool", caller, err))?;
        let _ = self.event_bus.publish(event);

        tracing::info!(%pool_id, min_stake = %entry.min_stake, "pool updated");
        Ok(entry)
    }

    /// Removes a pool. Escrows pledged against it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` or `AddressUnauthorised`.
    pub async fn delete_pool(&self, caller: &Principal, pool_id: PoolId) -> Result<(), GatewayError> {
        let mut ledger = self.ledger.write().await;
        let (_entry, event) = ledger
            .delete_pool(caller, pool_id)
            .inspect_err(|err| rejected("delete_pool", caller, err))?;
        let _ = self.event_bus.publish(event);

        tracing::info!(%pool_id, "pool deleted");
        Ok(())
    }

    /// Opens an escrow for `caller` against a live pool.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` or `InsufficientStake`.
    pub async fn create_escrow(
        &self,
        caller: &Principal,
        pool_id: PoolId,
        value: u128,
    ) -> Result<EscrowEntry, GatewayError> {
        let mut ledger = self.ledger.write().await;
        let (entry, event) = ledger
            .create_escrow(caller, pool_id, value)
            .inspect_err(|err| rejected("create_escrow", caller, err))?;
        let _ = self.event_bus.publish(event);

        tracing::info!(escrow_id = %entry.escrow_id, %pool_id, owner = %entry.owner, balance = %entry.balance, "escrow created");
        Ok(entry)
    }

    /// Deposits `value` into an escrow owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound`, `AddressUnauthorised` or `BalanceOverflow`.
    pub async fn deposit_escrow(
        &self,
        caller: &Principal,
        escrow_id: EscrowId,
        value: u128,
    ) -> Result<EscrowEntry, GatewayError> {
        let mut ledger = self.ledger.write().await;
        let (entry, event) = ledger
            .deposit_escrow(caller, escrow_id, value)
            .inspect_err(|err| rejected("deposit_escrow", caller, err))?;
        let _ = self.event_bus.publish(event);

        tracing::info!(%escrow_id, %value, balance = %entry.balance, "escrow deposit");
        Ok(entry)
    }

    /// Withdraws `amount` from an escrow owned by `caller`.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound`, `AddressUnauthorised` or `InsufficientBalance`.
    pub async fn withdraw_escrow(
        &self,
        caller: &Principal,
        escrow_id: EscrowId,
        amount: u128,
    ) -> Result<EscrowEntry, GatewayError> {
        let mut ledger = self.ledger.write().await;
        let (entry, event) = ledger
            .withdraw_escrow(caller, escrow_id, amount)
            .inspect_err(|err| rejected("withdraw_escrow", caller, err))?;
        let _ = self.event_bus.publish(event);

        tracing::info!(%escrow_id, %amount, balance = %entry.balance, "escrow withdrawal");
        Ok(entry)
    }

    /// Returns a live pool.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if the pool is not live.
    pub async fn get_pool(&self, pool_id: PoolId) -> Result<PoolEntry, GatewayError> {
        Ok(self.ledger.read().await.pool(pool_id)?)
    }

    /// Returns an escrow and whether its pool is still live.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if the escrow does not exist.
    pub async fn get_escrow(&self, escrow_id: EscrowId) -> Result<(EscrowEntry, bool), GatewayError> {
        Ok(self.ledger.read().await.escrow(escrow_id)?)
    }

    /// Lists live pools, optionally by owner, oldest first.
    pub async fn list_pools(&self, owner: Option<&Principal>) -> Vec<PoolEntry> {
        self.ledger.read().await.list_pools(owner)
    }

    /// Lists escrows matching `filter`, oldest first.
    pub async fn list_escrows(&self, filter: &EscrowFilter) -> Vec<EscrowEntry> {
        self.ledger.read().await.list_escrows(filter)
    }

    /// Returns current entity counts.
    pub async fn stats(&self) -> LedgerStats {
        let ledger = self.ledger.read().await;
        LedgerStats {
            pools: ledger.pools().len(),
            escrows: ledger.escrows().len(),
        }
    }
}

fn rejected(operation: &'static str, caller: &Principal, err: &LedgerError) {
    tracing::debug!(operation, %caller, reason = err.reason(), error = %err, "operation rejected");
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::broadcast::error::TryRecvError;

    use super::*;

    const MIN_STAKE: u128 = 1_050_975_209;

    fn make_service() -> LedgerService {
        LedgerService::new(EventBus::new(1000))
    }

    fn admin() -> Principal {
        Principal::from("pool-admin")
    }

    fn user() -> Principal {
        Principal::from("user")
    }

    async fn make_pool(service: &LedgerService) -> PoolId {
        let Ok(pool) = service
            .create_pool(
                &admin(),
                "Lorem Ipsum".to_string(),
                "lorem ipsum".to_string(),
                MIN_STAKE,
            )
            .await
        else {
            panic!("pool creation failed");
        };
        pool.pool_id
    }

    #[tokio::test]
    async fn create_pool_emits_event() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();

        let pool_id = make_pool(&service).await;

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "create_pool");
        assert_eq!(event.pool_id(), pool_id);
        assert_eq!(
            event.args().get(1),
            Some(&serde_json::Value::String("pool-admin".to_string()))
        );
    }

    #[tokio::test]
    async fn rejected_operation_emits_nothing() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();

        let result = service
            .create_pool(&admin(), String::new(), String::new(), 0)
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Ledger(LedgerError::EmptyString))
        ));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(service.stats().await.pools, 0);
    }

    #[tokio::test]
    async fn escrow_lifecycle_emits_events_in_order() {
        let service = make_service();
        let pool_id = make_pool(&service).await;
        let mut rx = service.event_bus().subscribe();

        let Ok(escrow) = service.create_escrow(&user(), pool_id, MIN_STAKE).await else {
            panic!("escrow creation failed");
        };
        let _ = service.deposit_escrow(&user(), escrow.escrow_id, 1).await;
        let _ = service
            .withdraw_escrow(&user(), escrow.escrow_id, MIN_STAKE + 1)
            .await;

        let mut kinds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            kinds.push(event.event_type_str());
        }
        assert_eq!(kinds, ["create_escrow", "deposit_escrow", "withdraw_escrow"]);

        let Ok((entry, pool_live)) = service.get_escrow(escrow.escrow_id).await else {
            panic!("escrow not found");
        };
        assert_eq!(entry.balance, 0);
        assert!(pool_live);
    }

    #[tokio::test]
    async fn delete_then_update_is_key_not_found() {
        let service = make_service();
        let pool_id = make_pool(&service).await;

        assert!(service.delete_pool(&admin(), pool_id).await.is_ok());
        let result = service
            .update_pool(&admin(), pool_id, "n".to_string(), String::new(), 0)
            .await;
        assert!(matches!(
            result,
            Err(GatewayError::Ledger(LedgerError::KeyNotFound(_)))
        ));
        assert!(service.get_pool(pool_id).await.is_err());
    }

    #[tokio::test]
    async fn concurrent_deposits_are_serialized() {
        let service = Arc::new(make_service());
        let pool_id = make_pool(&service).await;
        let Ok(escrow) = service.create_escrow(&user(), pool_id, MIN_STAKE).await else {
            panic!("escrow creation failed");
        };

        let mut handles = Vec::new();
        for _ in 0..50 {
            let service = Arc::clone(&service);
            let escrow_id = escrow.escrow_id;
            handles.push(tokio::spawn(async move {
                service.deposit_escrow(&user(), escrow_id, 2).await
            }));
        }
        for handle in handles {
            let Ok(Ok(_)) = handle.await else {
                panic!("deposit task failed");
            };
        }

        let Ok((entry, _)) = service.get_escrow(escrow.escrow_id).await else {
            panic!("escrow not found");
        };
        assert_eq!(entry.balance, MIN_STAKE + 100);
    }

    #[tokio::test]
    async fn concurrent_withdrawals_never_overdraw() {
        let service = Arc::new(make_service());
        let Ok(pool) = service
            .create_pool(&admin(), "p".to_string(), String::new(), 0)
            .await
        else {
            panic!("pool creation failed");
        };
        let Ok(escrow) = service.create_escrow(&user(), pool.pool_id, 10).await else {
            panic!("escrow creation failed");
        };

        let mut handles = Vec::new();
        for _ in 0..20 {
            let service = Arc::clone(&service);
            let escrow_id = escrow.escrow_id;
            handles.push(tokio::spawn(async move {
                service.withdraw_escrow(&user(), escrow_id, 1).await.is_ok()
            }));
        }
        let mut succeeded = 0;
        for handle in handles {
            if let Ok(true) = handle.await {
                succeeded += 1;
            }
        }
        assert_eq!(succeeded, 10);

        let Ok((entry, _)) = service.get_escrow(escrow.escrow_id).await else {
            panic!("escrow not found");
        };
        assert_eq!(entry.balance, 0);
    }

    #[tokio::test]
    async fn list_and_stats_reflect_state() {
        let service = make_service();
        let pool_id = make_pool(&service).await;
        let _ = service.create_escrow(&user(), pool_id, MIN_STAKE).await;
        let _ = service
            .create_pool(&user(), "mine".to_string(), String::new(), 0)
            .await;

        assert_eq!(service.list_pools(None).await.len(), 2);
        assert_eq!(service.list_pools(Some(&admin())).await.len(), 1);
        let filter = EscrowFilter {
            pool_id: Some(pool_id),
            owner: None,
        };
        assert_eq!(service.list_escrows(&filter).await.len(), 1);

        let stats = service.stats().await;
        assert_eq!(stats.pools, 2);
        assert_eq!(stats.escrows, 1);
    }
}
