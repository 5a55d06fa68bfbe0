pub mod details;
pub mod meta;
pub mod summary;

use scraper::ElementRef;

use super::schema::{card, details as rules};
use super::Page;
use crate::models::{AppRecord, AppSummary, Description, LanguageCode};

/// One search result card → summary.
pub fn assemble_summary(card: ElementRef<'_>) -> AppSummary {
    AppSummary {
        title: summary::title(card),
        icon: summary::icon(card),
        average_rating: summary::average_rating(card),
        developer: summary::developer(card),
        price: summary::price(card),
    }
}

/// Every card on a search page, in document order.
pub fn parse_cards(page: &Page) -> Vec<AppSummary> {
    card::CARD.all(page.root()).map(assemble_summary).collect()
}

/// Full record from a validated details page. Each field is read exactly once;
/// the description is only added when the page is in `lang`.
pub fn assemble_record(page: &Page, lang: &LanguageCode) -> AppRecord {
    let root = page.root();
    let info = meta::extract(root);

    let mut app = AppRecord {
        summary: AppSummary {
            title: details::title(root),
            icon: details::icon(root),
            average_rating: details::average_rating(root),
            developer: details::developer_name(root),
            price: details::price(root),
        },
        category: details::category(root),
        offers_in_app_purchases: details::offers_in_app_purchases(root),
        rating_histogram: details::rating_histogram(root),
        review_count: details::review_count(root),
        screenshot_urls: details::screenshot_urls(root),
        updated: info.updated,
        version: info.version,
        size: info.size,
        requires_android: info.requires_android,
        content_rating: info.content_rating,
        installs: info.installs,
        developer_contact: info.contact,
        ..AppRecord::default()
    };

    if let Some(description) = extract_description(page, lang) {
        app.insert_description(lang, description);
    }
    app
}

/// Description in `lang`, or `None` when the page declares another language.
/// A matching page without a description node yields empty text.
pub fn extract_description(page: &Page, lang: &LanguageCode) -> Option<Description> {
    let served = page.declared_language()?;
    if !lang.matches_served(served) {
        return None;
    }
    let node = rules::DESCRIPTION.first(page.root());
    Some(Description {
        plain: node.map(|n| n.text().collect()).unwrap_or_default(),
        html: node.and_then(|n| rules::DESCRIPTION.read(n)).unwrap_or_default(),
    })
}

// ── Tests ──
