//! Telegram Bot API message delivery.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::instrument;

use subscriber::model::SubscriberId;

use crate::notifier::{DeliveryError, Notifier};

pub struct TelegramNotifier {
    http: Client,
    send_url: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str) -> Result<Self, DeliveryError> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            http,
            send_url: format!("https://api.telegram.org/bot{bot_token}/sendMessage"),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    #[instrument(skip(self, text), fields(chat_id = chat_id), level = "debug")]
    async fn send_message(&self, chat_id: SubscriberId, text: &str) -> Result<(), DeliveryError> {
        let resp = self
            .http
            .post(&self.send_url)
            .json(&json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected(body));
        }

        Ok(())
    }
}
