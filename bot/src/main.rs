//! Composition root.
//!
//! Builds the registry, ledger, classifier pipeline, alert dispatcher and
//! monitor engine, then parks until ctrl-c. The command layer and the
//! chain transport attach from the outside: commands drive the registry
//! and `check_now`, the transport pushes decoded transfers into the
//! `TransferEvent` sender returned by `start_transfer_pipeline`.

mod config;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use alerts::dispatcher::AlertDispatcher;
use alerts::telegram::TelegramNotifier;
use common::logger::init_tracing;
use config::AppConfig;
use market::cmc::CmcClient;
use market::types::SymbolPair;
use scheduler::engine::MonitorEngine;
use scheduler::types::MonitorConfig;
use subscriber::registry::SubscriberRegistry;
use transfers::classifier::{Classifier, ClassifierConfig, DEFAULT_EXCHANGE_ADDRESSES};
use transfers::event::TransferEvent;
use transfers::ledger::TransactionLedger;
use transfers::pipeline::TransferPipeline;

/// Spawns the classifier pipeline and its broadcast consumer, returning
/// the sender the chain transport feeds decoded events into.
fn start_transfer_pipeline(
    cfg: &AppConfig,
    prices: Arc<CmcClient>,
    ledger: Arc<TransactionLedger>,
    dispatcher: Arc<AlertDispatcher<TelegramNotifier>>,
) -> mpsc::Sender<TransferEvent> {
    let (event_tx, event_rx) = mpsc::channel(cfg.event_queue_capacity);
    let (alert_tx, alert_rx) = mpsc::channel(cfg.alert_queue_capacity);

    let classifier_cfg = ClassifierConfig::new(
        cfg.base_symbol.clone(),
        cfg.min_transaction_size,
        DEFAULT_EXCHANGE_ADDRESSES.iter().map(|a| a.to_string()),
    );

    let pipeline = TransferPipeline::new(
        Classifier::new(classifier_cfg, prices),
        ledger,
        event_rx,
        alert_tx,
    );

    tokio::spawn(pipeline.run());
    tokio::spawn(dispatcher.run_transaction_alerts(alert_rx));

    event_tx
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("carrot-monitor");

    let cfg = AppConfig::from_env()?;
    let pair = SymbolPair::new(cfg.base_symbol.clone(), cfg.reference_symbol.clone());

    let registry = Arc::new(SubscriberRegistry::new());
    let ledger = Arc::new(TransactionLedger::new());
    let prices = Arc::new(CmcClient::new(cfg.cmc_api_url.clone(), cfg.cmc_api_key.clone())?);
    let notifier = Arc::new(TelegramNotifier::new(&cfg.telegram_bot_token)?);

    let dispatcher = Arc::new(AlertDispatcher::new(
        registry.clone(),
        notifier,
        pair.clone(),
    ));

    let transfer_sink =
        start_transfer_pipeline(&cfg, prices.clone(), ledger.clone(), dispatcher.clone());

    let engine = Arc::new(MonitorEngine::new(
        MonitorConfig::new(pair.clone()),
        registry,
        prices,
        dispatcher,
    ));
    tokio::spawn(engine.run());

    info!(pair = %pair.id(), "monitor running");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    drop(transfer_sink);
    Ok(())
}
