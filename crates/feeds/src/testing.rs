//! Test doubles for price sources.

use crate::{FetchError, PriceSource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use watcher_core::Robux;

/// Replays scripted outcomes in order.
///
/// Once the script runs out every call returns `FetchError::InvalidPrice`, which is
/// terminal, so a retry loop driven by this source always ends.
pub struct ScriptedSource {
    outcomes: Mutex<VecDeque<Result<Robux, FetchError>>>,
    calls: AtomicU32,
}

impl ScriptedSource {
    pub fn new(outcomes: Vec<Result<Robux, FetchError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicU32::new(0),
        }
    }

    /// Number of fetch attempts made so far.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn fetch_price(&self) -> Result<Robux, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .map_err(|_| FetchError::InvalidPrice("script poisoned".to_string()))?
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::InvalidPrice("script exhausted".to_string())))
    }
}
