use std::sync::atomic::{AtomicUsize, Ordering};

use market::errors::MarketError;
use market::source::PriceSource;
use market::types::{PairQuotes, SymbolPair};

/// Price source returning a fixed quote (or a fixed failure), with a call
/// counter for asserting fetch behavior.
pub struct MockPriceSource {
    price: Option<f64>,
    calls: AtomicUsize,
}

impl MockPriceSource {
    pub fn with_price(price: f64) -> Self {
        Self {
            price: Some(price),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            price: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PriceSource for MockPriceSource {
    async fn fetch_pair(&self, pair: &SymbolPair) -> Result<PairQuotes, MarketError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.price {
            Some(p) => Ok(PairQuotes {
                base_usd: p,
                reference_usd: p,
            }),
            None => Err(MarketError::MissingSymbol(pair.base.clone())),
        }
    }

    async fn fetch_usd_price(&self, symbol: &str) -> Result<f64, MarketError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.price
            .ok_or_else(|| MarketError::MissingSymbol(symbol.to_string()))
    }
}
