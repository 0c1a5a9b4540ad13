//! Alert message bodies.

use market::types::{PriceCheck, SymbolPair};
use transfers::classifier::{TransactionRecord, TxKind};

pub fn price_report(pair: &SymbolPair, check: &PriceCheck) -> String {
    let mut message = format!(
        "📊 Current Prices:\n\n\
         {}: ${:.6}\n\
         {}: ${:.6}\n\
         Threshold (55% of {}): ${:.6}\n\n",
        pair.reference,
        check.reference_usd,
        pair.base,
        check.base_usd,
        pair.reference,
        check.threshold_usd,
    );

    match check.discount_pct {
        Some(discount) => {
            message.push_str(&format!(
                "🚨 ALERT! {} is below threshold!\n\
                 Discount: {:.2}% below threshold\n\n\
                 This might be a good buying opportunity.",
                pair.base, discount,
            ));
        }
        None => {
            message.push_str(&format!("✅ {} price is above the threshold.", pair.base));
        }
    }

    message
}

pub fn check_failed() -> String {
    "❌ Error fetching cryptocurrency data. Please try again later.".to_string()
}

pub fn transaction_alert(symbol: &str, record: &TransactionRecord) -> String {
    let mut message = format!(
        "{} Large {} {} Detected!\n\nAmount: {:.2} {}",
        kind_emoji(record.kind),
        symbol,
        record.kind,
        record.amount,
        symbol,
    );

    if let Some(usd) = record.usd_value {
        message.push_str(&format!(" (${usd:.2} USD)"));
    }

    message.push_str(&format!(
        "\n\nTransaction: https://etherscan.io/tx/{}",
        record.hash
    ));

    message
}

fn kind_emoji(kind: TxKind) -> &'static str {
    match kind {
        TxKind::Buy => "🟢",
        TxKind::Sell => "🔴",
        TxKind::Mint => "✨",
        TxKind::Burn => "🔥",
        TxKind::Transfer => "🔄",
    }
}

#[cfg(test)]
mod tests {
    use market::types::{PairQuotes, PriceCheck};

    use super::*;

    fn pair() -> SymbolPair {
        SymbolPair::new("CARROT", "PUFFER")
    }

    #[test]
    fn below_threshold_report_carries_two_decimal_discount() {
        let check = PriceCheck::evaluate(&PairQuotes {
            base_usd: 0.40,
            reference_usd: 1.00,
        });

        let text = price_report(&pair(), &check);
        assert!(text.contains("27.27% below threshold"));
        assert!(text.contains("🚨"));
    }

    #[test]
    fn above_threshold_report_is_still_a_full_status() {
        let check = PriceCheck::evaluate(&PairQuotes {
            base_usd: 0.60,
            reference_usd: 1.00,
        });

        let text = price_report(&pair(), &check);
        assert!(text.contains("above the threshold"));
        assert!(text.contains("Threshold (55% of PUFFER): $0.550000"));
    }
}
