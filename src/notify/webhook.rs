//! Discord-compatible webhook sink.
//!
//! [`DiscordWebhookSink`] posts `{"content": ...}` to a webhook URL. Each
//! message is headed by the guild name in bold. There is no retry: the
//! dispatcher moves on to the next message on failure.

use std::time::Duration;

use async_trait::async_trait;

use super::NotificationSink;
use crate::error::WatchError;

/// [`NotificationSink`] that posts to a Discord webhook.
#[derive(Debug, Clone)]
pub struct DiscordWebhookSink {
    client: reqwest::Client,
    url: String,
}

impl DiscordWebhookSink {
    /// Creates a sink posting to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Config`] if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, WatchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatchError::Config(format!("http client: {e}")))?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Builds the JSON payload for one message.
    #[must_use]
    pub fn payload(guild_name: &str, message: &str) -> serde_json::Value {
        serde_json::json!({
            "content": format!("**{guild_name}**\n{message}"),
        })
    }
}

#[async_trait]
impl NotificationSink for DiscordWebhookSink {
    async fn deliver(&self, guild_name: &str, message: &str) -> Result<(), WatchError> {
        let response = self
            .client
            .post(&self.url)
            .json(&Self::payload(guild_name, message))
            .send()
            .await
            .map_err(|e| WatchError::Delivery(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatchError::Delivery(format!("HTTP {}", status.as_u16())));
        }
        Ok(())
    }
}
