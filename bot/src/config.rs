use anyhow::Context;

use market::cmc::DEFAULT_API_URL;
use transfers::classifier::DEFAULT_MIN_AMOUNT;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// CoinMarketCap API key (required).
    pub cmc_api_key: String,

    /// Quote endpoint; overridable for sandbox keys.
    pub cmc_api_url: String,

    /// Telegram bot token (required).
    pub telegram_bot_token: String,

    /// Watched token symbol.
    pub base_symbol: String,

    /// Benchmark token symbol; the alert threshold is 55% of its price.
    pub reference_symbol: String,

    /// Minimum reportable transfer size, in token units.
    ///
    /// Transfers below this are dropped outright; transfers above ten
    /// times this are broadcast to subscribers with alerts enabled.
    pub min_transaction_size: f64,

    /// Capacity of the decoded transfer event queue.
    ///
    /// Acts as backpressure against the chain transport: a burst of
    /// transfers queues here instead of growing without bound.
    pub event_queue_capacity: usize,

    /// Capacity of the pipeline -> dispatcher broadcast queue.
    pub alert_queue_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let cmc_api_key = std::env::var("CMC_API_KEY").context("CMC_API_KEY is not set")?;
        let telegram_bot_token =
            std::env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN is not set")?;

        let cmc_api_url =
            std::env::var("CMC_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let base_symbol = std::env::var("BASE_SYMBOL").unwrap_or_else(|_| "CARROT".to_string());
        let reference_symbol =
            std::env::var("REFERENCE_SYMBOL").unwrap_or_else(|_| "PUFFER".to_string());

        let min_transaction_size = match std::env::var("MIN_TRANSACTION_SIZE") {
            Ok(raw) => raw
                .parse::<f64>()
                .context("MIN_TRANSACTION_SIZE must be a number")?,
            Err(_) => DEFAULT_MIN_AMOUNT,
        };

        Ok(Self {
            cmc_api_key,
            cmc_api_url,
            telegram_bot_token,
            base_symbol,
            reference_symbol,
            min_transaction_size,
            event_queue_capacity: 256,
            alert_queue_capacity: 64,
        })
    }
}
