//! Fan-out of notifications to the recipient and broadcast channel.

use crate::messenger::Messenger;
use std::sync::Arc;
use tracing::{error, info};

/// Where notifications go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierConfig {
    /// User that receives direct messages
    pub recipient_id: i64,
    /// Optional channel that receives public copies
    pub broadcast_channel_id: Option<i64>,
}

/// Outcome of one delivery round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub direct: bool,
    /// None when no broadcast channel is configured
    pub broadcast: Option<bool>,
}

impl DeliveryReport {
    pub fn all_delivered(&self) -> bool {
        self.direct && self.broadcast.unwrap_or(true)
    }
}

/// Best-effort notifier. Each destination is tried once and independently.
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn Messenger>,
    config: NotifierConfig,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn Messenger>, config: NotifierConfig) -> Self {
        Self { messenger, config }
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    pub fn messenger(&self) -> &Arc<dyn Messenger> {
        &self.messenger
    }

    /// Send the same text to the recipient and, if configured, the broadcast channel.
    pub async fn notify(&self, text: &str) -> DeliveryReport {
        let direct = self.send_direct(text).await;
        let broadcast = match self.config.broadcast_channel_id {
            Some(channel_id) => Some(self.send_channel(channel_id, text).await),
            None => None,
        };
        DeliveryReport { direct, broadcast }
    }

    /// Send different texts to each destination (used for the online announcement).
    pub async fn announce(&self, direct_text: &str, channel_text: &str) -> DeliveryReport {
        let direct = self.send_direct(direct_text).await;
        let broadcast = match self.config.broadcast_channel_id {
            Some(channel_id) => Some(self.send_channel(channel_id, channel_text).await),
            None => None,
        };
        DeliveryReport { direct, broadcast }
    }

    async fn send_direct(&self, text: &str) -> bool {
        let recipient = self.config.recipient_id;
        match self.messenger.send_direct(recipient, text).await {
            Ok(()) => {
                info!(platform = self.messenger.platform(), recipient, "DM sent");
                true
            }
            Err(e) => {
                error!(platform = self.messenger.platform(), recipient, error = %e, "DM failed");
                false
            }
        }
    }

    async fn send_channel(&self, channel_id: i64, text: &str) -> bool {
        match self.messenger.send_channel(channel_id, text).await {
            Ok(()) => {
                info!(platform = self.messenger.platform(), channel_id, "Channel alert sent");
                true
            }
            Err(e) => {
                error!(
                    platform = self.messenger.platform(),
                    channel_id,
                    error = %e,
                    "Channel alert failed"
                );
                false
            }
        }
    }
}
