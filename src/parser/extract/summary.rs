use scraper::ElementRef;

use crate::parser::schema::card;
use crate::parser::transforms::{percentage_rating, trim_text};

pub fn title(card: ElementRef<'_>) -> String {
    card::TITLE
        .first_value(card)
        .map(|t| trim_text(&t))
        .unwrap_or_default()
}

pub fn icon(card: ElementRef<'_>) -> Option<String> {
    card::ICON.first_value(card)
}

pub fn developer(card: ElementRef<'_>) -> String {
    card::DEVELOPER
        .first_value(card)
        .map(|t| trim_text(&t))
        .unwrap_or_default()
}

// Star bar width is the only rating a card carries.
pub fn average_rating(card: ElementRef<'_>) -> f64 {
    percentage_rating(card::RATING.first_value(card).as_deref())
}

pub fn price(card: ElementRef<'_>) -> String {
    card::PRICE
        .first_value(card)
        .map(|t| trim_text(&t))
        .unwrap_or_default()
}
