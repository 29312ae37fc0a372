//! Notification delivery to the chat webhook.
//!
//! [`NotificationDispatcher`] chunks each guild's notification lines into
//! messages and paces them through a [`NotificationSink`]. Delivery is best
//! effort: a rejected message is logged and the next one is still sent.

pub mod dispatcher;
pub mod webhook;

use async_trait::async_trait;

use crate::error::WatchError;

pub use dispatcher::{DEFAULT_CHUNK_SIZE, DEFAULT_DELIVERY_DELAY, NotificationDispatcher};
pub use webhook::DiscordWebhookSink;

/// Destination for pre-formatted notification messages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers one multi-line message for `guild_name`.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Delivery`] if the message was not accepted.
    async fn deliver(&self, guild_name: &str, message: &str) -> Result<(), WatchError>;
}
