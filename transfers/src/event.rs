/// Sentinel address for mints (as sender) and burns (as recipient).
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// A decoded ERC-20 Transfer event, as delivered by the chain feed.
///
/// `value` is in raw token units (18 decimals). Block numbers are
/// non-decreasing per connection but carry no ordering guarantee across
/// feed reconnects.
#[derive(Debug, Clone)]
pub struct TransferEvent {
    pub from: String,
    pub to: String,
    pub value: u128,
    pub tx_hash: String,
    pub block_number: u64,
}
