//! The polling loop.

use std::sync::Arc;
use tracing::{info, warn};
use watcher_alerts::Notifier;
use watcher_core::{ItemDescriptor, PriceChange, PriceTracker, Robux};
use watcher_feeds::{fetch_with_retry, FetchError, PriceSource, RetryPolicy};

/// Watches one item and notifies on every Best Price change.
pub struct Monitor {
    source: Arc<dyn PriceSource>,
    notifier: Notifier,
    item: ItemDescriptor,
    policy: RetryPolicy,
    tracker: PriceTracker,
}

impl Monitor {
    pub fn new(
        source: Arc<dyn PriceSource>,
        notifier: Notifier,
        item: ItemDescriptor,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            source,
            notifier,
            item,
            policy,
            tracker: PriceTracker::new(),
        }
    }

    /// Start from an already known price.
    pub fn with_starting_price(mut self, price: Robux) -> Self {
        self.tracker = PriceTracker::seeded(price);
        self
    }

    pub fn last_price(&self) -> Option<Robux> {
        self.tracker.last()
    }

    /// One cycle: fetch, compare, notify on change.
    ///
    /// The new price is recorded whether or not delivery succeeds.
    pub async fn poll_once(&mut self) -> Result<Option<PriceChange>, FetchError> {
        let current = fetch_with_retry(self.source.as_ref(), &self.policy).await?;
        info!("Checked: {} Robux", current);

        let Some(change) = self.tracker.observe(current) else {
            return Ok(None);
        };

        info!(
            direction = change.direction.headline(),
            "Change: {} → {}", change.previous, change.current
        );
        let report = self.notifier.notify(&change.message(&self.item)).await;
        if !report.all_delivered() {
            warn!(?report, "Price change not delivered everywhere");
        }

        Ok(Some(change))
    }

    /// Poll forever, sleeping the item's interval between cycles.
    pub async fn run(mut self) {
        let interval = self.item.check_interval();
        info!(item = %self.item.name, ?interval, "Monitor loop started");

        loop {
            if let Err(e) = self.poll_once().await {
                warn!(
                    kind = e.kind(),
                    error = %e,
                    last = ?self.last_price(),
                    "Monitor cycle skipped - continuing"
                );
            }
            tokio::time::sleep(interval).await;
        }
    }
}
