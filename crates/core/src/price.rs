//! Price values scraped from the item page.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amount of Robux. Listings are whole numbers, there is no fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Robux(pub u64);

impl Robux {
    #[inline]
    pub fn new(amount: u64) -> Self {
        Self(amount)
    }

    #[inline]
    pub fn amount(self) -> u64 {
        self.0
    }

    /// Parse a digit run that may contain thousands separators, e.g. `"12,345"`.
    /// Returns None when nothing numeric is left or the value overflows.
    pub fn parse_grouped(raw: &str) -> Option<Self> {
        let digits: String = raw.chars().filter(|c| *c != ',').collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse::<u64>().ok().map(Self)
    }
}

impl From<u64> for Robux {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

/// Renders with thousands separators (`12,345`).
impl fmt::Display for Robux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
