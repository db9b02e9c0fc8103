//! Retry policy around single fetch attempts.

use crate::{FetchError, PriceSource};
use std::time::Duration;
use tracing::{info, warn};
use watcher_core::Robux;

/// How failed fetch attempts are repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Fixed pause between attempts
    pub delay: Duration,
    /// Give up after this many attempts; None retries forever
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(10),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// True once `attempts` failures have used up the budget.
    #[inline]
    pub fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

/// Fetch until a price is obtained, a terminal error occurs or the policy gives up.
pub async fn fetch_with_retry<S>(source: &S, policy: &RetryPolicy) -> Result<Robux, FetchError>
where
    S: PriceSource + ?Sized,
{
    let mut attempts = 0u32;

    loop {
        attempts = attempts.saturating_add(1);

        match source.fetch_price().await {
            Ok(price) => {
                if attempts > 1 {
                    info!(attempts, "Price fetched after retrying");
                }
                return Ok(price);
            }
            Err(e) if !e.is_retryable() => {
                warn!(kind = e.kind(), error = %e, "Price fetch failed, not retrying");
                return Err(e);
            }
            Err(e) if policy.exhausted(attempts) => {
                warn!(kind = e.kind(), error = %e, attempts, "Price fetch failed, giving up");
                return Err(e);
            }
            Err(e) => {
                warn!(
                    kind = e.kind(),
                    error = %e,
                    attempt = attempts,
                    "Price fetch failed - retrying in {:.0}s",
                    policy.delay.as_secs_f64()
                );
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
