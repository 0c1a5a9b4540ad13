use thiserror::Error;

use subscriber::model::SubscriberId;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("message rejected: {0}")]
    Rejected(String),
}

/// Outbound message channel, fire-and-forget from the core's perspective.
///
/// Implementations deliver `text` to the chat identified by `chat_id`.
/// The dispatcher logs failures; it never retries.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, chat_id: SubscriberId, text: &str) -> Result<(), DeliveryError>;
}
