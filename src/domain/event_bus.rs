//! Fan-out of committed ledger events.
//!
//! [`crate::service::LedgerService`] publishes each [`LedgerEvent`] while it
//! still holds the ledger write lock, so the order receivers observe is the
//! order mutations were committed. Every WebSocket connection takes its own
//! receiver at upgrade time and sees only events committed after that.
//!
//! Delivery is best effort: a receiver that falls more than `capacity`
//! events behind loses the oldest ones and is told how many it missed.

use tokio::sync::broadcast;

use super::LedgerEvent;

/// Broadcast bus for [`LedgerEvent`]s, backed by a bounded
/// `tokio::broadcast` ring.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LedgerEvent>,
}

impl EventBus {
    /// Creates a bus retaining up to `capacity` undelivered events per
    /// receiver (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Hands `event` to every current receiver and returns how many there
    /// were. With no receivers the event is dropped; the ledger state it
    /// records is already committed either way.
    pub fn publish(&self, event: LedgerEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Opens a receiver for events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.sender.subscribe()
    }

    /// Number of open receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
