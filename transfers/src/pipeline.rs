//! Inbound transfer queue consumer.
//!
//! The chain transport pushes decoded events into an mpsc channel; this
//! pipeline drains it in its own task, so a burst of transfers cannot
//! starve the price-check loop (and vice versa). Broadcast-worthy records
//! go out on a second queue consumed by the alert dispatcher.

use std::sync::Arc;

use tokio::sync::mpsc::{Receiver, Sender};
use tracing::{info, warn};

use market::source::PriceSource;

use crate::classifier::{Classifier, TransactionRecord};
use crate::event::TransferEvent;
use crate::ledger::TransactionLedger;

pub type AlertSender = Sender<TransactionRecord>;

pub struct TransferPipeline<P> {
    classifier: Classifier<P>,
    ledger: Arc<TransactionLedger>,
    rx: Receiver<TransferEvent>,
    alert_tx: AlertSender,
}

impl<P: PriceSource> TransferPipeline<P> {
    pub fn new(
        classifier: Classifier<P>,
        ledger: Arc<TransactionLedger>,
        rx: Receiver<TransferEvent>,
        alert_tx: AlertSender,
    ) -> Self {
        Self {
            classifier,
            ledger,
            rx,
            alert_tx,
        }
    }

    /// Drain the feed until the sending side is dropped.
    pub async fn run(mut self) {
        while let Some(event) = self.rx.recv().await {
            let Some(record) = self.classifier.classify(&event).await else {
                continue;
            };

            info!(
                kind = %record.kind,
                amount = record.amount,
                usd = record.usd_value,
                tx_hash = %record.hash,
                "transfer classified"
            );

            let broadcast = record.amount > self.classifier.cfg().broadcast_floor();
            self.ledger.append(record.clone()).await;

            if broadcast {
                if let Err(e) = self.alert_tx.send(record).await {
                    warn!(error = %e, "alert queue closed, broadcast dropped");
                }
            }
        }

        info!("transfer feed closed, pipeline stopping");
    }
}
