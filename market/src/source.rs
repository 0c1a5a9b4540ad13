use crate::errors::MarketError;
use crate::types::{PairQuotes, SymbolPair};

/// Abstract quote source.
///
/// The monitor engine and the classifier only ever talk to this trait;
/// `CmcClient` is the production implementation.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch USD quotes for both symbols in one call.
    async fn fetch_pair(&self, pair: &SymbolPair) -> Result<PairQuotes, MarketError>;

    /// Fetch the USD price of a single symbol.
    async fn fetch_usd_price(&self, symbol: &str) -> Result<f64, MarketError>;
}
