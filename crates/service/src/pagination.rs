//! Listing limits for the public service catalogue.
//!
//! The `limit` query parameter is parsed leniently: only a positive integer
//! caps the listing, anything else means "no limit".

/// Upper bound applied to any caller-supplied limit.
pub const MAX_LIMIT: u64 = 1000;

/// Listing limit parameter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListLimit(Option<u64>);

impl ListLimit {
    pub fn none() -> Self { Self(None) }

    /// Parse a raw query value from its leading integer: `"2.5"` and `"5abc"`
    /// read as 2 and 5. A leading sign and surrounding whitespace are accepted.
    pub fn parse(raw: Option<&str>) -> Self {
        let n = raw
            .and_then(leading_integer)
            .filter(|n| *n > 0)
            .map(|n| (n as u64).min(MAX_LIMIT));
        Self(n)
    }

    pub fn get(self) -> Option<u64> { self.0 }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits.bytes().position(|b| !b.is_ascii_digit()).unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate overlong inputs; the cap applies afterwards anyway.
    let n = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -n } else { n })
}

impl From<u64> for ListLimit {
    fn from(n: u64) -> Self {
        if n == 0 { Self(None) } else { Self(Some(n.min(MAX_LIMIT))) }
    }
}
