//! Price alert delivery.
//!
//! This crate provides:
//! - A `Messenger` abstraction over bot platforms
//! - Discord (REST) and Telegram (teloxide) implementations
//! - A best-effort `Notifier` for direct messages and channel broadcasts

pub mod discord;
pub mod messenger;
pub mod notifier;
pub mod telegram;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use discord::DiscordMessenger;
pub use messenger::{Messenger, MessengerError};
pub use notifier::{DeliveryReport, Notifier, NotifierConfig};
pub use telegram::TelegramMessenger;
