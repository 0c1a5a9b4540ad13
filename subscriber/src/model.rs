use serde::Serialize;

/// Chat id of the subscriber. Negative values are group chats.
pub type SubscriberId = i64;

pub const DEFAULT_INTERVAL_MINUTES: u32 = 5;

/// Per-chat monitoring state.
///
/// Records are created lazily on first interaction and never deleted;
/// "unsubscribe" only clears `active`, so the configured interval and
/// alert preference survive a stop/start cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Subscriber {
    pub chat_id: SubscriberId,

    /// Whether periodic price monitoring is running.
    pub active: bool,

    /// Minimum minutes between two scheduled checks for this chat.
    pub interval_minutes: u32,

    /// When the last successful check happened. `None` = never checked.
    pub last_checked_ms: Option<u64>,

    /// Whether this chat receives large-transaction broadcasts.
    pub transaction_alerts: bool,
}

impl Subscriber {
    pub fn new(chat_id: SubscriberId) -> Self {
        Self {
            chat_id,
            active: false,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            last_checked_ms: None,
            transaction_alerts: false,
        }
    }

    /// A subscriber is due when monitoring is active and either it has
    /// never been checked or its interval has fully elapsed.
    pub fn is_due(&self, now_ms: u64) -> bool {
        if !self.active {
            return false;
        }

        match self.last_checked_ms {
            None => true,
            Some(last) => {
                now_ms.saturating_sub(last) >= self.interval_minutes as u64 * 60_000
            }
        }
    }
}
