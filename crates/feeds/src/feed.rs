//! HTTP price source for the item page.

use crate::page::parse_price_page;
use crate::FetchError;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::debug;
use watcher_core::Robux;

/// Browser-like identification sent with every page request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Anything that can produce the current Best Price.
///
/// One call is one attempt; retrying is left to the caller.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self) -> Result<Robux, FetchError>;
}

/// Configuration for page fetching.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Page URL
    pub url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Per-request timeout (ms)
    pub request_timeout_ms: u64,
    /// Upper bound of the random pause taken before each request (ms)
    pub max_jitter_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            request_timeout_ms: 15_000,
            max_jitter_ms: 10_000,
        }
    }
}

impl FeedConfig {
    /// Default settings for the given page.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Pick a pause in `0..=max_jitter_ms`.
    pub fn jitter(&self) -> Duration {
        if self.max_jitter_ms == 0 {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(0..=self.max_jitter_ms);
        Duration::from_millis(ms)
    }
}

/// Scrapes the Best Price from a web page.
pub struct HttpPriceSource {
    config: FeedConfig,
    client: reqwest::Client,
}

impl HttpPriceSource {
    /// Build the source and its HTTP client.
    pub fn new(config: FeedConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    async fn fetch_price(&self) -> Result<Robux, FetchError> {
        let pause = self.config.jitter();
        tokio::time::sleep(pause).await;

        debug!(url = %self.config.url, ?pause, "Fetching item page");
        let response = self.client.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        parse_price_page(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::USER_AGENT, HeaderMap, StatusCode};
    use axum::response::Html;
    use axum::routing::get;
    use axum::Router;
    use std::sync::{Arc, Mutex};

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn quick(url: String) -> FeedConfig {
        FeedConfig {
            max_jitter_ms: 0,
            request_timeout_ms: 5_000,
            ..FeedConfig::for_url(url)
        }
    }

    #[test]
    fn test_feed_config_defaults() {
        let config = FeedConfig::for_url("https://example.com/item/1");
        assert_eq!(config.url, "https://example.com/item/1");
        assert_eq!(config.request_timeout_ms, 15_000);
        assert_eq!(config.max_jitter_ms, 10_000);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_jitter_bounds() {
        let config = FeedConfig {
            max_jitter_ms: 50,
            ..FeedConfig::for_url("https://example.com")
        };
        for _ in 0..100 {
            assert!(config.jitter() <= Duration::from_millis(50));
        }

        let config = FeedConfig {
            max_jitter_ms: 0,
            ..FeedConfig::for_url("https://example.com")
        };
        assert_eq!(config.jitter(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_http_source_creation() {
        let source = HttpPriceSource::new(FeedConfig::for_url("https://example.com")).unwrap();
        assert_eq!(source.config().url, "https://example.com");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_retryable() {
        let config = FeedConfig {
            max_jitter_ms: 0,
            request_timeout_ms: 2_000,
            ..FeedConfig::for_url("http://127.0.0.1:9/item")
        };
        let source = HttpPriceSource::new(config).unwrap();
        let err = source.fetch_price().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_scrapes_price_and_sends_browser_user_agent() {
        let seen_agent: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let recorded = Arc::clone(&seen_agent);
        let app = Router::new().route(
            "/item/1",
            get(move |headers: HeaderMap| {
                let recorded = Arc::clone(&recorded);
                async move {
                    *recorded.lock().unwrap() = headers
                        .get(USER_AGENT)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    Html(
                        "<html><body><div><h6>Best Price</h6>\
                         <h5 class=\"value\">12,345</h5></div></body></html>",
                    )
                }
            }),
        );
        let base = serve(app).await;

        let source = HttpPriceSource::new(quick(format!("{}/item/1", base))).unwrap();
        assert_eq!(source.fetch_price().await.unwrap(), Robux(12_345));
        assert_eq!(
            seen_agent.lock().unwrap().as_deref(),
            Some(BROWSER_USER_AGENT)
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let app = Router::new().route(
            "/item/1",
            get(|| async { (StatusCode::FORBIDDEN, "Best Price: 1") }),
        );
        let base = serve(app).await;

        let source = HttpPriceSource::new(quick(format!("{}/item/1", base))).unwrap();
        let err = source.fetch_price().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(status) if status == StatusCode::FORBIDDEN));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_page_without_price() {
        let app = Router::new().route(
            "/item/1",
            get(|| async { Html("<p>No resellers</p>") }),
        );
        let base = serve(app).await;

        let source = HttpPriceSource::new(quick(format!("{}/item/1", base))).unwrap();
        assert!(matches!(
            source.fetch_price().await,
            Err(FetchError::PriceNotFound)
        ));
    }
}
