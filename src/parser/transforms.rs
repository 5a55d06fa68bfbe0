use std::sync::LazyLock;

use regex::Regex;

use crate::models::UNPARSEABLE;

static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"width:\s*([0-9]+(?:\.[0-9]+)?)%").unwrap());

const FREE_LABEL: &str = "Install";
const FREE_PRICE: &str = "0";
const UNKNOWN_PRICE: &str = "unknown";

pub fn trim_text(s: &str) -> String {
    s.trim().to_string()
}

/// `width: 80%` on a star bar → 4.0. Missing style or no width → 0.0.
pub fn percentage_rating(style: Option<&str>) -> f64 {
    style
        .and_then(|s| WIDTH_RE.captures(s))
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|pct| (pct / 20.0).clamp(0.0, 5.0))
        .unwrap_or(0.0)
}

/// Non-negative count with thousands separators, e.g. `"1,234,567"`.
pub fn parse_count(text: &str) -> Option<i64> {
    let cleaned = text.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<i64>()
        .ok()
        .or_else(|| {
            cleaned
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        })
        .filter(|n| *n >= 0)
}

pub fn count_or_sentinel(text: &str) -> i64 {
    parse_count(text).unwrap_or(UNPARSEABLE)
}

/// Average score text on the details page, e.g. `"4.3"`.
pub fn parse_score(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|score| (0.0..=5.0).contains(score))
}

pub fn clean_href(href: Option<&str>) -> String {
    href.map(str::trim)
        .map(|h| h.strip_prefix("mailto:").unwrap_or(h).to_string())
        .unwrap_or_default()
}

pub fn normalize_price(content: Option<&str>) -> String {
    match content.map(str::trim) {
        None => UNKNOWN_PRICE.to_string(),
        Some(FREE_LABEL) => FREE_PRICE.to_string(),
        Some(price) => price.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_from_width() {
        assert_eq!(percentage_rating(Some("width: 80%")), 4.0);
        assert_eq!(percentage_rating(Some("width:86.4%;")), 86.4 / 20.0);
        assert_eq!(percentage_rating(Some("height: 10px")), 0.0);
        assert_eq!(percentage_rating(Some("width: 140%")), 5.0);
        assert_eq!(percentage_rating(None), 0.0);
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count("1,234,567"), Some(1_234_567));
        assert_eq!(parse_count("  0 "), Some(0));
        assert_eq!(parse_count("12.0"), Some(12));
        assert_eq!(parse_count("lots"), None);
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-3"), None);
    }

    #[test]
    fn sentinel_for_garbled_count() {
        assert_eq!(count_or_sentinel("n/a"), -1);
        assert_eq!(count_or_sentinel("0"), 0);
    }

    #[test]
    fn scores() {
        assert_eq!(parse_score(" 4.3 "), Some(4.3));
        assert_eq!(parse_score("9.1"), None);
        assert_eq!(parse_score(""), None);
    }

    #[test]
    fn hrefs() {
        assert_eq!(clean_href(Some("mailto:dev@example.com")), "dev@example.com");
        assert_eq!(clean_href(Some("https://example.com")), "https://example.com");
        assert_eq!(clean_href(None), "");
    }

    #[test]
    fn prices() {
        assert_eq!(normalize_price(Some("Install")), "0");
        assert_eq!(normalize_price(Some("$2.99")), "$2.99");
        assert_eq!(normalize_price(None), "unknown");
    }
}
