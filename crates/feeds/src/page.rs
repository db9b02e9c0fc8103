//! Visible-text extraction and the "Best Price" pattern.

use crate::FetchError;
use regex::Regex;
use std::sync::OnceLock;
use watcher_core::Robux;

fn best_price_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Best Price\s*[:\-]?\s*([\d,]+)").expect("valid Best Price pattern")
    })
}

fn hidden_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>|<!--.*?-->")
            .expect("valid hidden block pattern")
    })
}

/// Reduce an HTML document to its rendered text.
///
/// Scripts, styles and comments are dropped, tags become separators,
/// a few common entities are decoded and whitespace collapses to single spaces.
/// A `<` only opens a tag when followed by a letter, `/`, `!` or `?`; otherwise it is text.
pub fn visible_text(html: &str) -> String {
    let without_hidden = hidden_block_regex().replace_all(html, " ");

    let mut text = String::with_capacity(without_hidden.len());
    let mut in_tag = false;
    let mut chars = without_hidden.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '<' if !in_tag && chars.peek().is_some_and(|next| opens_tag(*next)) => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let decoded = decode_entities(&text);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn opens_tag(next: char) -> bool {
    next.is_ascii_alphabetic() || matches!(next, '/' | '!' | '?')
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#44;", ",")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Find the Best Price in already-rendered text.
pub fn extract_best_price(text: &str) -> Result<Robux, FetchError> {
    let caps = best_price_regex()
        .captures(text)
        .ok_or(FetchError::PriceNotFound)?;
    let raw = &caps[1];
    Robux::parse_grouped(raw).ok_or_else(|| FetchError::InvalidPrice(raw.to_string()))
}

/// Find the Best Price in an HTML page.
pub fn parse_price_page(html: &str) -> Result<Robux, FetchError> {
    extract_best_price(&visible_text(html))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_with_colon_and_commas() {
        assert_eq!(
            extract_best_price("Value 50,000 Best Price: 12,345 RAP 11,000").unwrap(),
            Robux(12_345)
        );
    }

    #[test]
    fn test_extract_variants() {
        assert_eq!(extract_best_price("best price 900").unwrap(), Robux(900));
        assert_eq!(extract_best_price("BEST PRICE-1,000").unwrap(), Robux(1000));
        assert_eq!(extract_best_price("Best Price - 42").unwrap(), Robux(42));
    }

    #[test]
    fn test_extract_missing() {
        assert!(matches!(
            extract_best_price("No resellers right now"),
            Err(FetchError::PriceNotFound)
        ));
        assert!(matches!(
            extract_best_price("Best Price: unavailable"),
            Err(FetchError::PriceNotFound)
        ));
    }

    #[test]
    fn test_extract_invalid() {
        assert!(matches!(
            extract_best_price("Best Price: ,,,"),
            Err(FetchError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_visible_text_drops_markup() {
        let html = r#"<html><head><style>.x { color: red }</style>
            <script>var best = "Best Price: 1";</script></head>
            <body><!-- Best Price: 2 --><div class="stat">Best&nbsp;Price</div>
            <span>12,345</span></body></html>"#;
        assert_eq!(visible_text(html), "Best Price 12,345");
    }

    #[test]
    fn test_literal_angle_brackets_are_text() {
        let html = "<p>Price < 5 units. Best Price: 900 > others</p>";
        assert_eq!(visible_text(html), "Price < 5 units. Best Price: 900 > others");
        assert_eq!(parse_price_page(html).unwrap(), Robux(900));
    }

    #[test]
    fn test_parse_price_page_across_tags() {
        let html = "<div><h6>Best Price</h6><h5 class=\"value\">1,234,000</h5></div>";
        assert_eq!(parse_price_page(html).unwrap(), Robux(1_234_000));
    }
}
