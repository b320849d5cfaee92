//! # world-pool-gateway
//!
//! Stake pool and escrow ledger with a REST API and WebSocket event stream.
//!
//! Principals create pools that carry a minimum stake, and open escrows
//! against those pools. Escrow owners deposit and withdraw value. Every
//! successful mutation emits one [`domain::LedgerEvent`], broadcast to
//! WebSocket subscribers.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── LedgerService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     └── Ledger (domain/)
//!           ├── PoolRegistry
//!           └── EscrowLedger
//! ```
//!
//! State is held in memory only; a restart starts from an empty ledger.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
