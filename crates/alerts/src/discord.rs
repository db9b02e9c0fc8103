//! Discord bot over the REST API.

use crate::messenger::{Messenger, MessengerError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CurrentUser {
    username: String,
    #[serde(default)]
    discriminator: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateDm {
    recipient_id: String,
}

#[derive(Debug, Deserialize)]
struct Channel {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateMessage<'a> {
    content: &'a str,
}

/// Discord bot authenticated with a bot token.
pub struct DiscordMessenger {
    http_client: reqwest::Client,
    token: String,
    base_url: String,
    /// recipient id -> DM channel id
    dm_channels: Mutex<HashMap<i64, String>>,
}

impl DiscordMessenger {
    pub const API_BASE: &'static str = "https://discord.com/api/v10";

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            token: token.into(),
            base_url: Self::API_BASE.to_string(),
            dm_channels: Mutex::new(HashMap::new()),
        }
    }

    /// Point the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, MessengerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(MessengerError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn dm_channel(&self, user_id: i64) -> Result<String, MessengerError> {
        if let Some(id) = self.cached_dm_channel(user_id) {
            return Ok(id);
        }

        let url = format!("{}/users/@me/channels", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&CreateDm {
                recipient_id: user_id.to_string(),
            })
            .send()
            .await?;
        let channel: Channel = Self::check(response).await?.json().await?;

        debug!(user_id, channel_id = %channel.id, "Opened DM channel");
        if let Ok(mut cache) = self.dm_channels.lock() {
            cache.insert(user_id, channel.id.clone());
        }
        Ok(channel.id)
    }

    fn cached_dm_channel(&self, user_id: i64) -> Option<String> {
        self.dm_channels
            .lock()
            .ok()
            .and_then(|cache| cache.get(&user_id).cloned())
    }

    async fn post_message(&self, channel_id: &str, text: &str) -> Result<(), MessengerError> {
        let url = format!("{}/channels/{}/messages", self.base_url, channel_id);
        let response = self
            .http_client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .json(&CreateMessage { content: text })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    fn platform(&self) -> &'static str {
        "discord"
    }

    async fn connect(&self) -> Result<String, MessengerError> {
        let url = format!("{}/users/@me", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;
        let user: CurrentUser = Self::check(response).await?.json().await?;

        Ok(match user.discriminator.as_deref() {
            Some(d) if d != "0" => format!("{}#{}", user.username, d),
            _ => user.username,
        })
    }

    async fn send_direct(&self, user_id: i64, text: &str) -> Result<(), MessengerError> {
        let channel_id = self.dm_channel(user_id).await?;
        self.post_message(&channel_id, text).await
    }

    async fn send_channel(&self, channel_id: i64, text: &str) -> Result<(), MessengerError> {
        self.post_message(&channel_id.to_string(), text).await
    }
}
