//! Per-connection subscription manager.
//!
//! Tracks which pool IDs a WebSocket client is subscribed to and
//! provides server-side event filtering. Escrow events are filtered by the
//! pool they are pledged against.

use std::collections::HashSet;

use crate::domain::PoolId;

/// Manages the set of pool subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed pool IDs. If `subscribe_all` is true, this set is ignored.
    pool_ids: HashSet<PoolId>,
    /// Whether the client subscribes to all pools (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds pool IDs to the subscription set, enabling the wildcard if
    /// `wildcard` is set.
    pub fn subscribe(&mut self, ids: &[PoolId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.pool_ids.extend(ids.iter().copied());
    }

    /// Removes pool IDs from the subscription set, dropping the wildcard if
    /// `wildcard` is set.
    pub fn unsubscribe(&mut self, ids: &[PoolId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = false;
        }
        for id in ids {
            self.pool_ids.remove(id);
        }
    }

    /// Returns `true` if the given pool ID matches the subscription filter.
    #[must_use]
    pub fn matches(&self, pool_id: PoolId) -> bool {
        self.subscribe_all || self.pool_ids.contains(&pool_id)
    }

    /// Returns the number of explicitly subscribed pool IDs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.pool_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

/// Splits raw `pool_ids` into parsed IDs and a wildcard flag.
///
/// Entries that are neither `"*"` nor a UUID are returned separately so the
/// caller can report them.
#[must_use]
pub fn parse_pool_ids(raw: &[String]) -> (Vec<PoolId>, bool, Vec<String>) {
    let mut ids = Vec::new();
    let mut wildcard = false;
    let mut invalid = Vec::new();
    for s in raw {
        if s == "*" {
            wildcard = true;
        } else if let Ok(uuid) = s.parse::<uuid::Uuid>() {
            ids.push(PoolId::from_uuid(uuid));
        } else {
            invalid.push(s.clone());
        }
    }
    (ids, wildcard, invalid)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(PoolId::new()));
    }

    #[test]
    fn subscribe_specific_pool() {
        let mut mgr = SubscriptionManager::new();
        let id = PoolId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(id));
        assert!(!mgr.matches(PoolId::new()));
    }

    #[test]
    fn wildcard_matches_everything_until_dropped() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(PoolId::new()));
        mgr.unsubscribe(&[], true);
        assert!(!mgr.is_subscribed_all());
        assert!(!mgr.matches(PoolId::new()));
    }

    #[test]
    fn unsubscribe_removes_pool() {
        let mut mgr = SubscriptionManager::new();
        let id = PoolId::new();
        mgr.subscribe(&[id], false);
        mgr.unsubscribe(&[id], false);
        assert!(!mgr.matches(id));
        assert_eq!(mgr.count(), 0);
    }

    #[test]
    fn parse_separates_wildcard_and_garbage() {
        let id = uuid::Uuid::new_v4();
        let raw = vec!["*".to_string(), id.to_string(), "nope".to_string()];
        let (ids, wildcard, invalid) = parse_pool_ids(&raw);
        assert_eq!(ids, vec![PoolId::from_uuid(id)]);
        assert!(wildcard);
        assert_eq!(invalid, vec!["nope".to_string()]);
    }
}
