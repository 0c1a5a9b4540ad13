use std::time::Duration;

use market::types::SymbolPair;

/// Timing and pair configuration for the monitor engine.
///
/// The tick period is global and independent of any subscriber's own
/// check interval; per-subscriber pacing happens via `last_checked_ms`.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub tick_interval: Duration,
    pub pair: SymbolPair,
}

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

impl MonitorConfig {
    pub fn new(pair: SymbolPair) -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            pair,
        }
    }
}
