//! Best Price scraping.
//!
//! This crate provides:
//! - `page` - visible-text extraction and the Best Price pattern
//! - `feed` - the HTTP source (one attempt per call, with request jitter)
//! - `retry` - fixed-delay retry policy with an optional attempt bound

pub mod error;
pub mod feed;
pub mod page;
pub mod retry;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::*;
pub use feed::{FeedConfig, HttpPriceSource, PriceSource, BROWSER_USER_AGENT};
pub use page::{extract_best_price, parse_price_page, visible_text};
pub use retry::{fetch_with_retry, RetryPolicy};
