//! Telegram bot via teloxide.

use crate::messenger::{Messenger, MessengerError};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

/// Telegram bot wrapper. Direct messages and channel posts are both chat messages.
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    /// Create a new bot with the given token.
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    /// Get the underlying bot.
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    async fn send(&self, chat_id: i64, text: &str) -> Result<(), MessengerError> {
        self.bot
            .send_message(ChatId(chat_id), to_html(text))
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    fn platform(&self) -> &'static str {
        "telegram"
    }

    async fn connect(&self) -> Result<String, MessengerError> {
        let me = self.bot.get_me().await?;
        Ok(me
            .user
            .username
            .clone()
            .unwrap_or_else(|| me.user.first_name.clone()))
    }

    async fn send_direct(&self, user_id: i64, text: &str) -> Result<(), MessengerError> {
        self.send(user_id, text).await
    }

    async fn send_channel(&self, channel_id: i64, text: &str) -> Result<(), MessengerError> {
        self.send(channel_id, text).await
    }
}

/// Convert `**bold**` markup to Telegram HTML, escaping everything else.
/// An unpaired `**` is kept literally.
pub fn to_html(text: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    let parts: Vec<&str> = escaped.split("**").collect();
    let paired = parts.len() - (parts.len() + 1) % 2;
    let mut out = String::with_capacity(escaped.len() + parts.len() * 4);
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            if i >= paired {
                out.push_str("**");
            } else if i % 2 == 1 {
                out.push_str("<b>");
            } else {
                out.push_str("</b>");
            }
        }
        out.push_str(part);
    }
    out
}
