//! The monitor engine.
//!
//! Each tick it:
//!   1. Asks the registry which subscribers are due.
//!   2. Performs ONE shared quote fetch for all of them (none when the
//!      due set is empty, so idle periods cost no upstream calls).
//!   3. Evaluates the threshold condition once.
//!   4. Stamps each due subscriber and hands the result to the dispatcher.

use std::sync::Arc;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use alerts::dispatcher::AlertDispatcher;
use alerts::notifier::Notifier;
use common::time::now_ms;
use market::errors::MarketError;
use market::source::PriceSource;
use market::types::PriceCheck;
use subscriber::model::SubscriberId;
use subscriber::registry::SubscriberRegistry;

use crate::types::MonitorConfig;

pub struct MonitorEngine<P, N> {
    cfg: MonitorConfig,
    registry: Arc<SubscriberRegistry>,
    prices: Arc<P>,
    dispatcher: Arc<AlertDispatcher<N>>,
}

impl<P: PriceSource, N: Notifier> MonitorEngine<P, N> {
    pub fn new(
        cfg: MonitorConfig,
        registry: Arc<SubscriberRegistry>,
        prices: Arc<P>,
        dispatcher: Arc<AlertDispatcher<N>>,
    ) -> Self {
        Self {
            cfg,
            registry,
            prices,
            dispatcher,
        }
    }

    /// Fixed-cadence loop. Ticks that overrun are skipped, not queued.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = interval(self.cfg.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            pair = %self.cfg.pair.id(),
            every_ms = self.cfg.tick_interval.as_millis(),
            "monitor engine started"
        );

        loop {
            ticker.tick().await;
            self.tick(now_ms()).await;
        }
    }

    /// One scheduling pass. The timestamp is injected so due/not-due
    /// boundaries are testable without wall-clock waits.
    pub async fn tick(&self, now_ms: u64) {
        let due = self.registry.due_for_check(now_ms);
        if due.is_empty() {
            debug!("no subscribers due, skipping fetch");
            return;
        }

        debug!(due = due.len(), "running scheduled price check");

        let quotes = match self.prices.fetch_pair(&self.cfg.pair).await {
            Ok(q) => q,
            Err(e) => {
                // The tick fails uniformly for every due subscriber; their
                // clocks stay untouched so the next tick picks them up again.
                warn!(error = %e, "scheduled quote fetch failed");
                self.dispatcher.dispatch_check_failed(&due).await;
                return;
            }
        };

        let check = PriceCheck::evaluate(&quotes);

        for id in due {
            self.registry.record_checked(id, now_ms);
            self.dispatcher.dispatch_price_report(id, &check).await;
        }
    }

    /// User-triggered check: fetches unconditionally, resets the periodic
    /// clock for a known subscriber, and returns the result to the caller.
    pub async fn check_now(
        &self,
        id: SubscriberId,
        now_ms: u64,
    ) -> Result<PriceCheck, MarketError> {
        match self.prices.fetch_pair(&self.cfg.pair).await {
            Ok(quotes) => {
                self.registry.record_checked(id, now_ms);

                let check = PriceCheck::evaluate(&quotes);
                self.dispatcher.dispatch_price_report(id, &check).await;
                Ok(check)
            }
            Err(e) => {
                warn!(chat_id = id, error = %e, "on-demand quote fetch failed");
                self.dispatcher.dispatch_check_failed(&[id]).await;
                Err(e)
            }
        }
    }
}
