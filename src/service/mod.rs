//! Service layer: transaction boundary and event emission.
//!
//! [`LedgerService`] serializes every ledger operation and publishes the
//! resulting events through the [`super::domain::EventBus`].

pub mod ledger_service;

pub use ledger_service::{LedgerService, LedgerStats};
