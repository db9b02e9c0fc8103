//! Test doubles for messengers.

use crate::messenger::{Messenger, MessengerError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Records deliveries as `(kind, id, text)` where kind is `"dm"` or `"channel"`.
///
/// Each destination kind, and `connect`, can be made to fail.
#[derive(Default)]
pub struct RecordingMessenger {
    pub fail_connect: bool,
    pub fail_direct: bool,
    pub fail_channel: bool,
    pub(crate) connects: AtomicU32,
    pub(crate) sent: Mutex<Vec<(&'static str, i64, String)>>,
}

impl RecordingMessenger {
    /// Connects fine, every delivery fails.
    pub fn failing() -> Self {
        Self {
            fail_direct: true,
            fail_channel: true,
            ..Default::default()
        }
    }

    /// Every connect attempt fails.
    pub fn unreachable() -> Self {
        Self {
            fail_connect: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(&'static str, i64, String)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Number of delivered messages of one kind whose text starts with `prefix`.
    pub fn count(&self, kind: &str, prefix: &str) -> usize {
        self.sent()
            .iter()
            .filter(|(k, _, text)| *k == kind && text.starts_with(prefix))
            .count()
    }

    pub fn connects(&self) -> u32 {
        self.connects.load(Ordering::SeqCst)
    }

    fn record(&self, kind: &'static str, id: i64, text: &str) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((kind, id, text.to_string()));
        }
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    fn platform(&self) -> &'static str {
        "test"
    }

    async fn connect(&self) -> Result<String, MessengerError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail_connect {
            return Err(MessengerError::Api {
                status: 401,
                body: "401: Unauthorized".to_string(),
            });
        }
        Ok("test-bot".to_string())
    }

    async fn send_direct(&self, user_id: i64, text: &str) -> Result<(), MessengerError> {
        if self.fail_direct {
            return Err(MessengerError::Api {
                status: 403,
                body: "Cannot send messages to this user".to_string(),
            });
        }
        self.record("dm", user_id, text);
        Ok(())
    }

    async fn send_channel(&self, channel_id: i64, text: &str) -> Result<(), MessengerError> {
        if self.fail_channel {
            return Err(MessengerError::Api {
                status: 404,
                body: "Unknown Channel".to_string(),
            });
        }
        self.record("channel", channel_id, text);
        Ok(())
    }
}
