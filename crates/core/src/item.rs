//! The tracked item.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Static description of the item being watched. Fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// Display name used in notifications
    pub name: String,
    /// Page that renders the "Best Price" field
    pub url: String,
    /// Delay between two checks, in seconds
    pub check_interval_secs: u64,
}

impl ItemDescriptor {
    pub const DEFAULT_NAME: &'static str = "Azurewrath Fabergé Egg";
    pub const DEFAULT_URL: &'static str = "https://www.rolimons.com/item/76692318";
    pub const DEFAULT_INTERVAL_SECS: u64 = 60;

    pub fn new(name: impl Into<String>, url: impl Into<String>, check_interval_secs: u64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            check_interval_secs,
        }
    }

    #[inline]
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

impl Default for ItemDescriptor {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_NAME,
            Self::DEFAULT_URL,
            Self::DEFAULT_INTERVAL_SECS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_item() {
        let item = ItemDescriptor::default();
        assert_eq!(item.name, "Azurewrath Fabergé Egg");
        assert!(item.url.starts_with("https://"));
        assert_eq!(item.check_interval(), Duration::from_secs(60));
    }
}
