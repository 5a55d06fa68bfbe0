pub mod extract;
pub mod schema;
pub mod transforms;

use scraper::{ElementRef, Html};

use schema::details;

pub const NOT_FOUND_TITLE: &str = "Not Found";

/// One fetched marketplace page, parsed once and read by every extractor.
pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(body: &str) -> Self {
        Page {
            html: Html::parse_document(body),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// `lang` attribute of `<html>`, the page's declared language.
    pub fn declared_language(&self) -> Option<&str> {
        self.root().value().attr("lang").map(str::trim)
    }

    /// A 404-styled page whose `<title>` reads "Not Found".
    pub fn is_not_found(&self) -> bool {
        details::PAGE_TITLE
            .first_value(self.root())
            .is_some_and(|title| title.trim() == NOT_FOUND_TITLE)
    }
}
