//! CoinMarketCap quote client.
//!
//! Thin wrapper over the `quotes/latest` endpoint. Both trait methods hit
//! the same endpoint; `fetch_pair` asks for both symbols in a single
//! request so one scheduled tick costs one upstream call.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::errors::MarketError;
use crate::source::PriceSource;
use crate::types::{PairQuotes, SymbolPair};

pub const DEFAULT_API_URL: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";

const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

#[derive(Clone)]
pub struct CmcClient {
    http: Client,
    url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct QuotesEnvelope {
    data: HashMap<String, TokenEntry>,
}

#[derive(Debug, Deserialize)]
struct TokenEntry {
    quote: HashMap<String, QuoteEntry>,
}

#[derive(Debug, Deserialize)]
struct QuoteEntry {
    price: f64,
}

impl CmcClient {
    pub fn new(url: String, api_key: String) -> Result<Self, MarketError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { http, url, api_key })
    }

    #[instrument(skip(self), fields(symbols = %symbols), level = "debug")]
    async fn fetch_envelope(&self, symbols: &str) -> Result<QuotesEnvelope, MarketError> {
        let resp = self
            .http
            .get(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("symbol", symbols)])
            .send()
            .await?
            .error_for_status()?;

        let envelope: QuotesEnvelope = resp.json().await?;

        debug!(symbols = envelope.data.len(), "quotes fetched");

        Ok(envelope)
    }
}

fn usd_price(envelope: &QuotesEnvelope, symbol: &str) -> Result<f64, MarketError> {
    let entry = envelope
        .data
        .get(symbol)
        .ok_or_else(|| MarketError::MissingSymbol(symbol.to_string()))?;

    entry
        .quote
        .get("USD")
        .map(|q| q.price)
        .ok_or_else(|| MarketError::InvalidResponse(format!("no USD quote for {symbol}")))
}

#[async_trait::async_trait]
impl PriceSource for CmcClient {
    async fn fetch_pair(&self, pair: &SymbolPair) -> Result<PairQuotes, MarketError> {
        let symbols = format!("{},{}", pair.base, pair.reference);
        let envelope = self.fetch_envelope(&symbols).await?;

        Ok(PairQuotes {
            base_usd: usd_price(&envelope, &pair.base)?,
            reference_usd: usd_price(&envelope, &pair.reference)?,
        })
    }

    async fn fetch_usd_price(&self, symbol: &str) -> Result<f64, MarketError> {
        let envelope = self.fetch_envelope(symbol).await?;
        usd_price(&envelope, symbol)
    }
}
