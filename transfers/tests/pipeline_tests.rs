mod mock_price;

use std::sync::Arc;

use tokio::sync::mpsc;

use mock_price::MockPriceSource;
use transfers::classifier::{Classifier, ClassifierConfig, TransactionRecord};
use transfers::event::TransferEvent;
use transfers::ledger::TransactionLedger;
use transfers::pipeline::TransferPipeline;

const WEI: u128 = 1_000_000_000_000_000_000;

fn event(tokens: u128) -> TransferEvent {
    TransferEvent {
        from: "0xaaa".into(),
        to: "0xbbb".into(),
        value: tokens * WEI,
        tx_hash: format!("0x{tokens:x}"),
        block_number: tokens as u64,
    }
}

/// Run a batch of events through a pipeline to completion, returning the
/// ledger and whatever reached the alert queue.
async fn run_pipeline(
    events: Vec<TransferEvent>,
) -> (Arc<TransactionLedger>, Vec<TransactionRecord>) {
    let prices = Arc::new(MockPriceSource::with_price(1.0));
    let ledger = Arc::new(TransactionLedger::new());

    let (event_tx, event_rx) = mpsc::channel(16);
    let (alert_tx, mut alert_rx) = mpsc::channel(16);

    let pipeline = TransferPipeline::new(
        Classifier::new(ClassifierConfig::default(), prices),
        ledger.clone(),
        event_rx,
        alert_tx,
    );
    let handle = tokio::spawn(pipeline.run());

    for e in events {
        event_tx.send(e).await.unwrap();
    }
    drop(event_tx);
    handle.await.unwrap();

    let mut alerts = Vec::new();
    while let Ok(record) = alert_rx.try_recv() {
        alerts.push(record);
    }

    (ledger, alerts)
}

#[tokio::test]
async fn sub_minimum_events_leave_no_trace() {
    let (ledger, alerts) = run_pipeline(vec![event(1), event(999)]).await;

    assert_eq!(ledger.len().await, 0);
    assert!(alerts.is_empty());
}

#[tokio::test]
async fn material_but_not_significant_is_stored_only() {
    let (ledger, alerts) = run_pipeline(vec![event(5_000)]).await;

    assert_eq!(ledger.len().await, 1);
    assert!(alerts.is_empty(), "5000 tokens is under the broadcast floor");
}

#[tokio::test]
async fn significant_transfer_is_stored_and_broadcast() {
    let (ledger, alerts) = run_pipeline(vec![event(15_000)]).await;

    assert_eq!(ledger.len().await, 1);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].amount, 15_000.0);
}

#[tokio::test]
async fn exactly_ten_times_minimum_is_not_broadcast() {
    let (_, alerts) = run_pipeline(vec![event(10_000)]).await;
    assert!(alerts.is_empty(), "the floor is strict");
}

#[tokio::test]
async fn mixed_batch_routes_each_event_correctly() {
    let (ledger, alerts) =
        run_pipeline(vec![event(500), event(2_000), event(20_000), event(3_000)]).await;

    assert_eq!(ledger.len().await, 3);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].amount, 20_000.0);
}
