//! String parsing helpers for values scraped out of listing markup.
//!
//! Every function here is total: malformed input yields `None`, never a
//! panic or an error. Callers treat `None` as "field not present".

use std::sync::LazyLock;

use regex::Regex;

/// Currency symbols stripped before a price is parsed.
const CURRENCY_SYMBOLS: [char; 3] = ['€', '$', '£'];

/// First run of digits, allowing `,` and `.` as thousands separators.
static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,.]*").expect("valid count regex"));

/// Digits following a `#` marker, as in `"#1,234 in Toys & Games"`.
static RANK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\s*(\d[\d,.]*)").expect("valid rank regex"));

/// Parses a displayed price such as `"€12,99"`, `"$1,234.56"` or `"1.234,56 €"`.
///
/// Currency symbols and whitespace (including no-break spaces) are removed.
/// A lone comma is always a decimal separator, so `"1,234"` reads as 1.234
/// rather than 1234: the wholesale site shows European prices and a
/// comma-only thousands group cannot be told apart from a decimal comma.
/// When both `.` and `,` appear, the
/// rightmost one is the decimal separator and the other is dropped as a
/// thousands separator.
///
/// Returns `None` for anything that does not end up as a finite number.
/// `Some(0.0)` means the page really showed zero.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_SYMBOLS.contains(c))
        .collect();

    let normalized = match (cleaned.rfind('.'), cleaned.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (None, Some(_)) => cleaned.replace(',', "."),
        _ => cleaned,
    };

    // `f64::from_str` also accepts "inf" and "NaN"; neither is a price.
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extracts the first digit group from text like `"1,234 ratings"`,
/// stripping thousands separators.
#[must_use]
pub fn parse_count(text: &str) -> Option<u64> {
    let group = COUNT_RE.find(text)?.as_str();
    strip_separators(group).parse().ok()
}

/// Extracts the number after the first `#` marker in a Best Sellers Rank
/// line, stripping thousands separators.
#[must_use]
pub fn parse_rank(text: &str) -> Option<u64> {
    let group = RANK_RE.captures(text)?.get(1)?.as_str();
    strip_separators(group).parse().ok()
}

/// First whitespace-delimited token, e.g. `"4.5"` from `"4.5 out of 5 stars"`.
#[must_use]
pub fn first_token(text: &str) -> Option<String> {
    text.split_whitespace().next().map(str::to_owned)
}

fn strip_separators(group: &str) -> String {
    group.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
