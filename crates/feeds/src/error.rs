//! Error types for price fetching.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur during a single fetch attempt.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),

    #[error("Best Price not found on page")]
    PriceNotFound,

    #[error("Unparseable price: {0:?}")]
    InvalidPrice(String),
}

impl FetchError {
    /// Returns true if another attempt may succeed.
    ///
    /// Every HTTP status is retried (blocks and outages are usually temporary);
    /// the retry policy decides when to stop.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::InvalidPrice(_))
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(e) if e.is_timeout() => "timeout",
            FetchError::Network(_) => "network",
            FetchError::Status(_) => "status",
            FetchError::PriceNotFound => "not_found",
            FetchError::InvalidPrice(_) => "invalid_price",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::PriceNotFound.is_retryable());
        assert!(FetchError::Status(StatusCode::BAD_GATEWAY).is_retryable());
        assert!(FetchError::Status(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(FetchError::Status(StatusCode::REQUEST_TIMEOUT).is_retryable());
        assert!(FetchError::Status(StatusCode::FORBIDDEN).is_retryable());
        assert!(FetchError::Status(StatusCode::NOT_FOUND).is_retryable());

        assert!(!FetchError::InvalidPrice("9".repeat(30)).is_retryable());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(FetchError::PriceNotFound.kind(), "not_found");
        assert_eq!(FetchError::Status(StatusCode::NOT_FOUND).kind(), "status");
    }
}
