//! Turns raw transfers into typed, materiality-filtered records.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use market::source::PriceSource;

use crate::event::{TransferEvent, ZERO_ADDRESS};

/// Semantic type of a transfer, derived from its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TxKind {
    Mint,
    Burn,
    Buy,
    Sell,
    Transfer,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TxKind::Mint => "Mint",
            TxKind::Burn => "Burn",
            TxKind::Buy => "Buy",
            TxKind::Sell => "Sell",
            TxKind::Transfer => "Transfer",
        };
        f.write_str(s)
    }
}

/// A classified, material transfer. Owned by the ledger once appended.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub hash: String,
    pub from: String,
    pub to: String,
    /// Token quantity after 18-decimal scaling.
    pub amount: f64,
    /// `None` when the price lookup failed at classification time.
    pub usd_value: Option<f64>,
    pub kind: TxKind,
    pub timestamp: DateTime<Utc>,
    pub block_number: u64,
}

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Symbol used for the USD valuation lookup.
    pub symbol: String,

    /// Minimum reportable size in token units. Transfers below this are
    /// discarded outright.
    pub min_amount: f64,

    /// Token decimals used to scale the raw event value.
    pub decimals: u32,

    /// Router/exchange addresses, stored lowercase.
    exchange_addresses: HashSet<String>,
}

pub const DEFAULT_MIN_AMOUNT: f64 = 1000.0;
pub const TOKEN_DECIMALS: u32 = 18;

/// Routers the watched token actually trades through.
pub const DEFAULT_EXCHANGE_ADDRESSES: [&str; 2] = [
    "0x7a250d5630b4cf539739df2c5dacb4c659f2488d", // Uniswap V2 router
    "0xe592427a0aece92de3edee1f18e0157c05861564", // Uniswap V3 router
];

impl ClassifierConfig {
    pub fn new(
        symbol: impl Into<String>,
        min_amount: f64,
        exchange_addresses: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            min_amount,
            decimals: TOKEN_DECIMALS,
            exchange_addresses: exchange_addresses
                .into_iter()
                .map(|a| a.to_lowercase())
                .collect(),
        }
    }

    /// Transfers strictly above ten times the minimum also get broadcast
    /// to subscribers; everything between min and 10x min is only stored.
    pub fn broadcast_floor(&self) -> f64 {
        self.min_amount * 10.0
    }

    fn is_exchange(&self, addr: &str) -> bool {
        self.exchange_addresses.contains(&addr.to_lowercase())
    }

    /// Kind by endpoint comparison. Precedence matters: mint/burn checks
    /// come before the exchange checks, so a mint out of a router address
    /// set is still a mint.
    pub fn classify_kind(&self, from: &str, to: &str) -> TxKind {
        if from.eq_ignore_ascii_case(ZERO_ADDRESS) {
            TxKind::Mint
        } else if to.eq_ignore_ascii_case(ZERO_ADDRESS) {
            TxKind::Burn
        } else if self.is_exchange(from) {
            TxKind::Buy
        } else if self.is_exchange(to) {
            TxKind::Sell
        } else {
            TxKind::Transfer
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::new(
            "CARROT",
            DEFAULT_MIN_AMOUNT,
            DEFAULT_EXCHANGE_ADDRESSES.iter().map(|a| a.to_string()),
        )
    }
}

pub struct Classifier<P> {
    cfg: ClassifierConfig,
    prices: Arc<P>,
}

impl<P: PriceSource> Classifier<P> {
    pub fn new(cfg: ClassifierConfig, prices: Arc<P>) -> Self {
        Self { cfg, prices }
    }

    pub fn cfg(&self) -> &ClassifierConfig {
        &self.cfg
    }

    /// Classify one raw transfer.
    ///
    /// Returns `None` for sub-minimum transfers (hard filter). A failed
    /// price lookup degrades `usd_value` to `None` and is never retried.
    pub async fn classify(&self, event: &TransferEvent) -> Option<TransactionRecord> {
        let amount = event.value as f64 / 10f64.powi(self.cfg.decimals as i32);

        if amount < self.cfg.min_amount {
            debug!(amount, tx_hash = %event.tx_hash, "transfer below minimum, skipped");
            return None;
        }

        let kind = self.cfg.classify_kind(&event.from, &event.to);

        let usd_value = match self.prices.fetch_usd_price(&self.cfg.symbol).await {
            Ok(price) => Some(amount * price),
            Err(e) => {
                warn!(error = %e, tx_hash = %event.tx_hash, "price lookup failed, usd value omitted");
                None
            }
        };

        Some(TransactionRecord {
            hash: event.tx_hash.clone(),
            from: event.from.clone(),
            to: event.to.clone(),
            amount,
            usd_value,
            kind,
            timestamp: Utc::now(),
            block_number: event.block_number,
        })
    }
}
