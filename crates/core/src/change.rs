//! Price change detection and the messages built from it.

use crate::{ItemDescriptor, Robux};
use serde::{Deserialize, Serialize};

/// Which way the price moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Drop,
    Up,
}

impl Direction {
    /// Headline shown at the start of a change message.
    pub fn headline(self) -> &'static str {
        match self {
            Direction::Drop => "DROP!",
            Direction::Up => "UP!",
        }
    }
}

/// A difference between two consecutive observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChange {
    pub previous: Robux,
    pub current: Robux,
    pub direction: Direction,
}

impl PriceChange {
    /// Classify a move from `previous` to `current`. None when nothing changed.
    pub fn between(previous: Robux, current: Robux) -> Option<Self> {
        let direction = if current < previous {
            Direction::Drop
        } else if current > previous {
            Direction::Up
        } else {
            return None;
        };
        Some(Self {
            previous,
            current,
            direction,
        })
    }

    /// Notification text for this change.
    pub fn message(&self, item: &ItemDescriptor) -> String {
        format!(
            "**{}** {} → **{}** Robux (was {})\n{}",
            self.direction.headline(),
            item.name,
            self.current,
            self.previous,
            item.url
        )
    }
}

/// Holds the last observed price.
///
/// Owned by the monitor task, so there is exactly one reader and writer.
#[derive(Debug, Default, Clone)]
pub struct PriceTracker {
    last: Option<Robux>,
}

impl PriceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker already seeded with a starting price.
    pub fn seeded(price: Robux) -> Self {
        Self { last: Some(price) }
    }

    pub fn last(&self) -> Option<Robux> {
        self.last
    }

    /// Record a freshly fetched price and report the change, if any.
    /// The first observation never produces a change.
    pub fn observe(&mut self, current: Robux) -> Option<PriceChange> {
        let change = self
            .last
            .and_then(|previous| PriceChange::between(previous, current));
        self.last = Some(current);
        change
    }
}

/// Direct message sent once the session comes up.
pub fn direct_online_message(item: &ItemDescriptor) -> String {
    format!("**Bot awake!** Watching {} at {}", item.name, item.url)
}

/// Channel post sent once the session comes up.
pub fn channel_online_message(item: &ItemDescriptor) -> String {
    format!(
        "**Bot online!** Monitoring **{}**\nCurrent best price checking every {}s → {}",
        item.name, item.check_interval_secs, item.url
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item() -> ItemDescriptor {
        ItemDescriptor::new("Test Egg", "https://example.com/item/1", 60)
    }

    #[test]
    fn test_between_classifies_direction() {
        let drop = PriceChange::between(Robux(1000), Robux(900)).unwrap();
        assert_eq!(drop.direction, Direction::Drop);

        let up = PriceChange::between(Robux(900), Robux(950)).unwrap();
        assert_eq!(up.direction, Direction::Up);

        assert!(PriceChange::between(Robux(900), Robux(900)).is_none());
    }

    #[test]
    fn test_change_message() {
        let change = PriceChange::between(Robux(1000), Robux(900)).unwrap();
        assert_eq!(
            change.message(&item()),
            "**DROP!** Test Egg → **900** Robux (was 1,000)\nhttps://example.com/item/1"
        );

        let change = PriceChange::between(Robux(12_000), Robux(12_500)).unwrap();
        assert!(change.message(&item()).starts_with("**UP!** Test Egg → **12,500**"));
    }

    #[test]
    fn test_first_observation_is_silent() {
        let mut tracker = PriceTracker::new();
        assert_eq!(tracker.last(), None);
        assert!(tracker.observe(Robux(1000)).is_none());
        assert_eq!(tracker.last(), Some(Robux(1000)));
    }

    #[test]
    fn test_tracker_sequence() {
        let mut tracker = PriceTracker::seeded(Robux(1000));

        let change = tracker.observe(Robux(900)).unwrap();
        assert_eq!(change.direction, Direction::Drop);
        assert_eq!(tracker.last(), Some(Robux(900)));

        assert!(tracker.observe(Robux(900)).is_none());

        let change = tracker.observe(Robux(950)).unwrap();
        assert_eq!(change.direction, Direction::Up);
        assert_eq!(change.previous, Robux(900));
        assert_eq!(tracker.last(), Some(Robux(950)));
    }

    #[test]
    fn test_online_messages() {
        assert_eq!(
            direct_online_message(&item()),
            "**Bot awake!** Watching Test Egg at https://example.com/item/1"
        );
        assert!(channel_online_message(&item()).contains("every 60s"));
    }
}
