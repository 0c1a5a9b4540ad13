//! Quote types and the threshold computation.

/// Fraction of the reference price that forms the alert line for the
/// watched token. Fixed design parameter, not per-subscriber configurable.
pub const THRESHOLD_RATIO: f64 = 0.55;

/// The two symbols the monitor tracks: `base` is the watched token,
/// `reference` is the benchmark it is compared against.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct SymbolPair {
    pub base: String,
    pub reference: String,
}

impl SymbolPair {
    pub fn new(base: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            reference: reference.into(),
        }
    }

    pub fn id(&self) -> String {
        format!("{}/{}", self.base, self.reference)
    }
}

/// One fetch worth of USD quotes for both symbols.
#[derive(Debug, Clone, Copy)]
pub struct PairQuotes {
    pub base_usd: f64,
    pub reference_usd: f64,
}

/// Outcome of evaluating one pair of quotes against the threshold.
///
/// Ephemeral: owned by the call that produced it, never cached.
#[derive(Debug, Clone, Copy)]
pub struct PriceCheck {
    pub base_usd: f64,
    pub reference_usd: f64,
    pub threshold_usd: f64,
    pub below_threshold: bool,
    /// How far below the threshold the base price sits, as a percentage of
    /// the threshold. Only defined when `below_threshold`.
    pub discount_pct: Option<f64>,
}

impl PriceCheck {
    pub fn evaluate(quotes: &PairQuotes) -> Self {
        let threshold_usd = quotes.reference_usd * THRESHOLD_RATIO;
        let below_threshold = quotes.base_usd < threshold_usd;

        let discount_pct =
            below_threshold.then(|| (threshold_usd - quotes.base_usd) / threshold_usd * 100.0);

        Self {
            base_usd: quotes.base_usd,
            reference_usd: quotes.reference_usd,
            threshold_usd,
            below_threshold,
            discount_pct,
        }
    }
}
