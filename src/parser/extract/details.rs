use std::collections::BTreeMap;

use scraper::ElementRef;

use crate::parser::schema::{details, Rule};
use crate::parser::transforms::{
    count_or_sentinel, normalize_price, parse_count, parse_score, trim_text,
};

const STARS: std::ops::RangeInclusive<i64> = 1..=5;

pub fn title(root: ElementRef<'_>) -> String {
    text_of(&details::TITLE, root)
}

pub fn icon(root: ElementRef<'_>) -> Option<String> {
    details::ICON.first_value(root)
}

pub fn average_rating(root: ElementRef<'_>) -> f64 {
    details::SCORE
        .first_value(root)
        .and_then(|s| parse_score(&s))
        .unwrap_or(0.0)
}

/// Missing node and garbled text both end up as the -1 sentinel.
pub fn review_count(root: ElementRef<'_>) -> i64 {
    count_or_sentinel(&details::REVIEWS.first_value(root).unwrap_or_default())
}

pub fn price(root: ElementRef<'_>) -> String {
    normalize_price(details::PRICE.first_value(root).as_deref())
}

pub fn offers_in_app_purchases(root: ElementRef<'_>) -> bool {
    details::IN_APP.exists(root)
}

pub fn screenshot_urls(root: ElementRef<'_>) -> Vec<String> {
    details::SCREENSHOT
        .all(root)
        .filter_map(|img| details::SCREENSHOT.read(img))
        .collect()
}

pub fn developer_name(root: ElementRef<'_>) -> String {
    text_of(&details::DEVELOPER, root)
}

pub fn category(root: ElementRef<'_>) -> String {
    text_of(&details::CATEGORY, root)
}

/// Star count ("1".."5") to number of ratings. Bars without a valid star
/// label are skipped; a garbled count is kept as -1.
pub fn rating_histogram(root: ElementRef<'_>) -> BTreeMap<String, i64> {
    let mut histogram = BTreeMap::new();
    for bar in details::RATING_BAR.all(root) {
        let Some(star) = details::BAR_LABEL
            .first_value(bar)
            .and_then(|label| parse_count(&label))
            .filter(|star| STARS.contains(star))
        else {
            continue;
        };
        let count = count_or_sentinel(&details::BAR_NUMBER.first_value(bar).unwrap_or_default());
        histogram.insert(star.to_string(), count);
    }
    histogram
}

fn text_of(rule: &Rule, root: ElementRef<'_>) -> String {
    rule.first_value(root)
        .map(|t| trim_text(&t))
        .unwrap_or_default()
}
