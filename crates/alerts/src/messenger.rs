//! Messaging platform abstraction.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MessengerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

/// Outbound side of a bot session.
///
/// Ids are the platform's numeric identifiers (Discord snowflakes, Telegram chat ids).
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Platform name for logs.
    fn platform(&self) -> &'static str;

    /// Establish or verify the session. Returns the bot's display name.
    async fn connect(&self) -> Result<String, MessengerError>;

    /// Send a direct message to a user.
    async fn send_direct(&self, user_id: i64, text: &str) -> Result<(), MessengerError>;

    /// Post a message to a channel.
    async fn send_channel(&self, channel_id: i64, text: &str) -> Result<(), MessengerError>;
}
