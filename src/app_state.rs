//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::LedgerService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Ledger service for all business logic.
    pub ledger_service: Arc<LedgerService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds the state around a fresh, empty ledger.
    #[must_use]
    pub fn new(event_bus_capacity: usize) -> Self {
        let event_bus = EventBus::new(event_bus_capacity);
        let ledger_service = Arc::new(LedgerService::new(event_bus.clone()));
        Self {
            ledger_service,
            event_bus,
        }
    }
}
