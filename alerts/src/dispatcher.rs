//! Fans alerts out to the matching subset of subscribers.
//!
//! Every send is independent: one chat failing (blocked bot, dead chat)
//! must never stop delivery to the rest of the fan-out.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::mpsc::Receiver;
use tracing::{error, info};

use market::types::{PriceCheck, SymbolPair};
use subscriber::model::SubscriberId;
use subscriber::registry::SubscriberRegistry;
use transfers::classifier::TransactionRecord;

use crate::format;
use crate::notifier::Notifier;

pub struct AlertDispatcher<N> {
    registry: Arc<SubscriberRegistry>,
    notifier: Arc<N>,
    pair: SymbolPair,
}

impl<N: Notifier> AlertDispatcher<N> {
    pub fn new(registry: Arc<SubscriberRegistry>, notifier: Arc<N>, pair: SymbolPair) -> Self {
        Self {
            registry,
            notifier,
            pair,
        }
    }

    /// Send the status of one completed check to one subscriber. A price
    /// above the threshold is still reported; silence is never an outcome.
    pub async fn dispatch_price_report(&self, id: SubscriberId, check: &PriceCheck) {
        let text = format::price_report(&self.pair, check);
        self.send_logged(id, &text).await;
    }

    /// Tell every affected subscriber that their scheduled check failed.
    pub async fn dispatch_check_failed(&self, ids: &[SubscriberId]) {
        let text = format::check_failed();
        join_all(ids.iter().map(|id| self.send_logged(*id, &text))).await;
    }

    /// Broadcast one qualifying transaction to every subscriber with
    /// alerts enabled. Returns how many deliveries succeeded.
    pub async fn dispatch_transaction_alert(&self, record: &TransactionRecord) -> u32 {
        let targets = self.registry.with_transaction_alerts();
        if targets.is_empty() {
            return 0;
        }

        let text = format::transaction_alert(&self.pair.base, record);

        let results = join_all(targets.iter().map(|&id| {
            let text = &text;
            async move {
                match self.notifier.send_message(id, text).await {
                    Ok(()) => true,
                    Err(e) => {
                        error!(chat_id = id, error = %e, "transaction alert delivery failed");
                        false
                    }
                }
            }
        }))
        .await;

        let sent = results.into_iter().filter(|ok| *ok).count() as u32;

        info!(
            sent,
            targets = targets.len(),
            kind = %record.kind,
            amount = record.amount,
            "transaction alert dispatched"
        );

        sent
    }

    /// Consume the pipeline's broadcast queue until it closes.
    pub async fn run_transaction_alerts(self: Arc<Self>, mut rx: Receiver<TransactionRecord>) {
        while let Some(record) = rx.recv().await {
            self.dispatch_transaction_alert(&record).await;
        }

        info!("broadcast queue closed, alert consumer stopping");
    }

    async fn send_logged(&self, id: SubscriberId, text: &str) {
        if let Err(e) = self.notifier.send_message(id, text).await {
            error!(chat_id = id, error = %e, "delivery failed");
        }
    }
}
