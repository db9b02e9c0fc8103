//! Session bootstrap and the reconnecting supervisor.

use crate::monitor::Monitor;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use watcher_alerts::{MessengerError, Notifier};
use watcher_core::{channel_online_message, direct_online_message, ItemDescriptor};
use watcher_feeds::{fetch_with_retry, FetchError, PriceSource, RetryPolicy};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Connection failed: {0}")]
    Connect(#[from] MessengerError),
    #[error("Starting price unavailable: {0}")]
    Seed(#[from] FetchError),
    #[error("Monitor task stopped: {0}")]
    MonitorStopped(String),
}

/// Everything needed to bring one session up.
#[derive(Clone)]
pub struct Session {
    pub notifier: Notifier,
    pub source: Arc<dyn PriceSource>,
    pub item: ItemDescriptor,
    pub policy: RetryPolicy,
}

impl Session {
    /// Connect, seed the starting price, announce and spawn the monitor loop.
    ///
    /// The announcement is only sent once a starting price is known, so a session
    /// that cannot seed stays silent.
    pub async fn establish(&self) -> Result<JoinHandle<()>, SessionError> {
        let messenger = self.notifier.messenger();
        info!(platform = messenger.platform(), "Connecting...");
        let bot_name = messenger.connect().await?;
        info!("Logged in as {} - Monitoring {}", bot_name, self.item.name);

        let current = fetch_with_retry(self.source.as_ref(), &self.policy).await?;
        info!("Starting price: {} Robux", current);

        self.notifier
            .announce(
                &direct_online_message(&self.item),
                &channel_online_message(&self.item),
            )
            .await;

        let monitor = Monitor::new(
            Arc::clone(&self.source),
            self.notifier.clone(),
            self.item.clone(),
            self.policy,
        )
        .with_starting_price(current);

        Ok(tokio::spawn(monitor.run()))
    }
}

/// Re-establishes the session after failures, with a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct Supervisor {
    pub reconnect_delay: Duration,
    /// Consecutive failures tolerated; None keeps trying forever
    pub max_attempts: Option<u32>,
}

impl Supervisor {
    /// Run sessions until the failure budget is used up.
    pub async fn run(&self, session: &Session) -> Result<(), SessionError> {
        let mut failures = 0u32;

        loop {
            let e = match session.establish().await {
                Ok(handle) => {
                    failures = 0;
                    match handle.await {
                        Ok(()) => SessionError::MonitorStopped("loop returned".to_string()),
                        Err(e) => SessionError::MonitorStopped(e.to_string()),
                    }
                }
                Err(e) => e,
            };

            failures = failures.saturating_add(1);
            error!(error = %e, attempt = failures, "Session failed");

            if self.max_attempts.is_some_and(|max| failures >= max) {
                error!(attempts = failures, "Giving up on session");
                return Err(e);
            }

            warn!(
                "Reconnecting in {:.0} seconds...",
                self.reconnect_delay.as_secs_f64()
            );
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }
}
