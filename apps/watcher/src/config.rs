//! Application configuration, read from the environment.

use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use watcher_core::ItemDescriptor;
use watcher_feeds::{FeedConfig, RetryPolicy};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set in environment variables")]
    Missing(&'static str),
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Bot platform used for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Discord,
    Telegram,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discord" => Ok(Platform::Discord),
            "telegram" => Ok(Platform::Telegram),
            other => Err(format!("unknown platform '{}', expected discord or telegram", other)),
        }
    }
}

/// Everything the watcher needs, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Bot token
    pub token: String,
    /// User that receives direct messages
    pub recipient_id: i64,
    /// Optional public channel for alerts
    pub broadcast_channel_id: Option<i64>,
    pub platform: Platform,
    pub item: ItemDescriptor,
    /// Attempt bound for one price fetch; None retries forever
    pub fetch_max_attempts: Option<u32>,
    /// Bound on consecutive failed session attempts; None retries forever
    pub reconnect_max_attempts: Option<u32>,
}

impl WatcherConfig {
    /// Fixed pause between failed fetch attempts.
    pub const FETCH_RETRY_DELAY: Duration = Duration::from_secs(10);
    /// Fixed pause before re-establishing the session.
    pub const RECONNECT_DELAY: Duration = Duration::from_secs(10);

    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let token = get("TOKEN").ok_or(ConfigError::Missing("TOKEN"))?;
        let recipient_id = parse_var(
            "NOTIFY_USER_ID",
            &get("NOTIFY_USER_ID").ok_or(ConfigError::Missing("NOTIFY_USER_ID"))?,
        )?;
        let broadcast_channel_id = get("BROADCAST_CHANNEL_ID")
            .map(|v| parse_var("BROADCAST_CHANNEL_ID", &v))
            .transpose()?;
        let platform = get("MESSENGER")
            .map(|v| parse_var("MESSENGER", &v))
            .transpose()?
            .unwrap_or_default();

        let defaults = ItemDescriptor::default();
        let check_interval_secs = get("CHECK_INTERVAL_SECONDS")
            .map(|v| parse_var::<u64>("CHECK_INTERVAL_SECONDS", &v))
            .transpose()?
            .unwrap_or(defaults.check_interval_secs);
        if check_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "CHECK_INTERVAL_SECONDS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let item = ItemDescriptor::new(
            get("ITEM_NAME").unwrap_or(defaults.name),
            get("ITEM_URL").unwrap_or(defaults.url),
            check_interval_secs,
        );

        let fetch_max_attempts = get("FETCH_MAX_ATTEMPTS")
            .map(|v| parse_var("FETCH_MAX_ATTEMPTS", &v))
            .transpose()?;
        let reconnect_max_attempts = get("RECONNECT_MAX_ATTEMPTS")
            .map(|v| parse_var("RECONNECT_MAX_ATTEMPTS", &v))
            .transpose()?;

        Ok(Self {
            token,
            recipient_id,
            broadcast_channel_id,
            platform,
            item,
            fetch_max_attempts,
            reconnect_max_attempts,
        })
    }

    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig::for_url(self.item.url.clone())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            delay: Self::FETCH_RETRY_DELAY,
            max_attempts: self.fetch_max_attempts,
        }
    }
}

fn parse_var<T>(name: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
