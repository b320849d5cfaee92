//! Domain layer: identities, records, the ledger state machine and events.
//!
//! This module contains the server-side domain model: pool and escrow
//! identity, the two record types, the pool registry and escrow ledger that
//! validate and apply every operation, their composition into a single
//! [`Ledger`], and the event bus for broadcasting committed changes.

pub mod escrow_entry;
pub mod escrow_id;
pub mod escrow_ledger;
pub mod event_bus;
pub mod ledger;
pub mod ledger_event;
pub mod pool_entry;
pub mod pool_id;
pub mod pool_registry;
pub mod principal;

pub use escrow_entry::EscrowEntry;
pub use escrow_id::EscrowId;
pub use escrow_ledger::{EscrowFilter, EscrowLedger};
pub use event_bus::EventBus;
pub use ledger::Ledger;
pub use ledger_event::LedgerEvent;
pub use pool_entry::PoolEntry;
pub use pool_id::PoolId;
pub use pool_registry::PoolRegistry;
pub use principal::Principal;
