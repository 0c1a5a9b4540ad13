//! Bounded recent-transaction buffer.

use std::collections::VecDeque;

use tokio::sync::Mutex;

use crate::classifier::TransactionRecord;

pub const LEDGER_CAPACITY: usize = 50;

/// Insertion-ordered store of the most recent classified transactions.
///
/// Newest first; once full, the oldest entry is evicted regardless of
/// amount or kind. Insertion order is the single source of truth for
/// recency.
pub struct TransactionLedger {
    capacity: usize,
    inner: Mutex<VecDeque<TransactionRecord>>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::with_capacity(LEDGER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub async fn append(&self, record: TransactionRecord) {
        let mut guard = self.inner.lock().await;
        guard.push_front(record);
        if guard.len() > self.capacity {
            guard.pop_back();
        }
    }

    /// Cloned snapshot, newest first. Callers never observe a live handle
    /// into the buffer.
    pub async fn recent(&self) -> Vec<TransactionRecord> {
        self.inner.lock().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

impl Default for TransactionLedger {
    fn default() -> Self {
        Self::new()
    }
}
