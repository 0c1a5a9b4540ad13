//! The registry is the sole mutation surface for subscriber state.
//!
//! Backed by a sharded concurrent map so a read-modify-write on one chat
//! id never blocks operations on another id, and nothing here holds a
//! guard across an await point (every method is synchronous).

use dashmap::DashMap;

use crate::model::{Subscriber, SubscriberId};

#[derive(Default)]
pub struct SubscriberRegistry {
    inner: DashMap<SubscriberId, Subscriber>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing record for `id`, creating the default one if
    /// this is the first interaction. Idempotent.
    pub fn get_or_create(&self, id: SubscriberId) -> Subscriber {
        self.inner
            .entry(id)
            .or_insert_with(|| Subscriber::new(id))
            .clone()
    }

    /// Snapshot of a single subscriber, if one exists.
    pub fn get(&self, id: SubscriberId) -> Option<Subscriber> {
        self.inner.get(&id).map(|s| s.clone())
    }

    /// Start or stop price monitoring. Creates the record on first use;
    /// stopping never removes it.
    pub fn set_active(&self, id: SubscriberId, active: bool) {
        let mut entry = self.inner.entry(id).or_insert_with(|| Subscriber::new(id));
        entry.active = active;
    }

    /// Flip the transaction-alert preference and return the new value.
    /// Leaves `active` and `interval_minutes` untouched.
    pub fn toggle_transaction_alerts(&self, id: SubscriberId) -> bool {
        let mut entry = self.inner.entry(id).or_insert_with(|| Subscriber::new(id));
        entry.transaction_alerts = !entry.transaction_alerts;
        entry.transaction_alerts
    }

    /// Stamp the last successful check. No-op for an unknown id: the clock
    /// only exists for chats that have interacted before.
    pub fn record_checked(&self, id: SubscriberId, now_ms: u64) {
        if let Some(mut entry) = self.inner.get_mut(&id) {
            entry.last_checked_ms = Some(now_ms);
        }
    }

    /// Ids whose scheduled check interval has elapsed (or that were never
    /// checked). Order follows map iteration: unspecified, but stable for
    /// a fixed registry state.
    pub fn due_for_check(&self, now_ms: u64) -> Vec<SubscriberId> {
        self.inner
            .iter()
            .filter(|entry| entry.value().is_due(now_ms))
            .map(|entry| *entry.key())
            .collect()
    }

    /// Ids that should receive large-transaction broadcasts.
    pub fn with_transaction_alerts(&self) -> Vec<SubscriberId> {
        self.inner
            .iter()
            .filter(|entry| entry.value().active && entry.value().transaction_alerts)
            .map(|entry| *entry.key())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
