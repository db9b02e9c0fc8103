//! Best Price Watcher
//!
//! Polls an item page for its Best Price and alerts a bot recipient on every change.

mod config;
mod monitor;
mod session;

use config::{Platform, WatcherConfig};
use session::{Session, Supervisor};
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use watcher_alerts::{DiscordMessenger, Messenger, Notifier, NotifierConfig, TelegramMessenger};
use watcher_feeds::{HttpPriceSource, PriceSource};

fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn build_messenger(config: &WatcherConfig) -> Arc<dyn Messenger> {
    match config.platform {
        Platform::Discord => Arc::new(DiscordMessenger::new(config.token.clone())),
        Platform::Telegram => Arc::new(TelegramMessenger::new(&config.token)),
    }
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_logging(&log_level);

    let config = match WatcherConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting {} price watcher...", config.item.name);
    info!("  Platform: {:?}", config.platform);
    info!("  Item URL: {}", config.item.url);
    info!("  Check interval: {}s", config.item.check_interval_secs);
    match config.broadcast_channel_id {
        Some(channel_id) => info!("  Broadcast channel: {}", channel_id),
        None => info!("  Broadcast channel: none"),
    }

    let source: Arc<dyn PriceSource> = match HttpPriceSource::new(config.feed_config()) {
        Ok(source) => Arc::new(source),
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let notifier = Notifier::new(
        build_messenger(&config),
        NotifierConfig {
            recipient_id: config.recipient_id,
            broadcast_channel_id: config.broadcast_channel_id,
        },
    );

    let session = Session {
        notifier,
        source,
        item: config.item.clone(),
        policy: config.retry_policy(),
    };
    let supervisor = Supervisor {
        reconnect_delay: WatcherConfig::RECONNECT_DELAY,
        max_attempts: config.reconnect_max_attempts,
    };

    tokio::select! {
        result = supervisor.run(&session) => {
            if let Err(e) = result {
                error!("Watcher stopped: {}", e);
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested, stopping watcher");
        }
    }
}
