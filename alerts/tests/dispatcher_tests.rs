use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use alerts::dispatcher::AlertDispatcher;
use alerts::notifier::{DeliveryError, Notifier};
use market::types::{PairQuotes, PriceCheck, SymbolPair};
use subscriber::model::SubscriberId;
use subscriber::registry::SubscriberRegistry;
use transfers::classifier::{TransactionRecord, TxKind};

/// Records every delivery; fails on command for selected chat ids.
struct MockNotifier {
    sent: Mutex<Vec<(SubscriberId, String)>>,
    fail_for: HashSet<SubscriberId>,
}

impl MockNotifier {
    fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: HashSet::new(),
        }
    }

    fn failing_for(ids: impl IntoIterator<Item = SubscriberId>) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: ids.into_iter().collect(),
        }
    }

    fn delivered_ids(&self) -> Vec<SubscriberId> {
        let mut ids: Vec<_> = self.sent.lock().unwrap().iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids
    }
}

#[async_trait::async_trait]
impl Notifier for MockNotifier {
    async fn send_message(&self, chat_id: SubscriberId, text: &str) -> Result<(), DeliveryError> {
        if self.fail_for.contains(&chat_id) {
            return Err(DeliveryError::Rejected("chat unreachable".into()));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

fn record(amount: f64) -> TransactionRecord {
    TransactionRecord {
        hash: "0xfeed".into(),
        from: "0xaaa".into(),
        to: "0xbbb".into(),
        amount,
        usd_value: Some(amount * 0.5),
        kind: TxKind::Buy,
        timestamp: Utc::now(),
        block_number: 99,
    }
}

fn dispatcher(
    registry: Arc<SubscriberRegistry>,
    notifier: Arc<MockNotifier>,
) -> AlertDispatcher<MockNotifier> {
    AlertDispatcher::new(registry, notifier, SymbolPair::new("CARROT", "PUFFER"))
}

#[tokio::test]
async fn transaction_alert_targets_exactly_active_subscribers_with_alerts_on() {
    let registry = Arc::new(SubscriberRegistry::new());

    // qualifies
    registry.set_active(1, true);
    registry.toggle_transaction_alerts(1);
    // alerts on but monitoring stopped
    registry.toggle_transaction_alerts(2);
    // monitoring on, alerts off
    registry.set_active(3, true);
    // default record
    registry.get_or_create(4);

    let notifier = Arc::new(MockNotifier::new());
    let d = dispatcher(registry, notifier.clone());

    let sent = d.dispatch_transaction_alert(&record(15_000.0)).await;

    assert_eq!(sent, 1);
    assert_eq!(notifier.delivered_ids(), vec![1]);
}

#[tokio::test]
async fn one_failed_delivery_does_not_stop_the_fanout() {
    let registry = Arc::new(SubscriberRegistry::new());
    for id in [1, 2, 3] {
        registry.set_active(id, true);
        registry.toggle_transaction_alerts(id);
    }

    let notifier = Arc::new(MockNotifier::failing_for([2]));
    let d = dispatcher(registry, notifier.clone());

    let sent = d.dispatch_transaction_alert(&record(15_000.0)).await;

    assert_eq!(sent, 2);
    assert_eq!(notifier.delivered_ids(), vec![1, 3]);
}

#[tokio::test]
async fn price_report_is_sent_even_above_threshold() {
    let registry = Arc::new(SubscriberRegistry::new());
    let notifier = Arc::new(MockNotifier::new());
    let d = dispatcher(registry, notifier.clone());

    let check = PriceCheck::evaluate(&PairQuotes {
        base_usd: 0.60,
        reference_usd: 1.00,
    });
    d.dispatch_price_report(7, &check).await;

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("above the threshold"));
}

#[tokio::test]
async fn check_failed_reaches_every_affected_subscriber() {
    let registry = Arc::new(SubscriberRegistry::new());
    let notifier = Arc::new(MockNotifier::failing_for([5]));
    let d = dispatcher(registry, notifier.clone());

    d.dispatch_check_failed(&[4, 5, 6]).await;

    assert_eq!(notifier.delivered_ids(), vec![4, 6]);
}
