//! Every landmark the extractors depend on, as data.
//!
//! Each [`Rule`] pairs a CSS selector with what to read from the matched node.
//! When the marketplace template changes, this file is the one to update.

use std::sync::OnceLock;

use scraper::element_ref::Select;
use scraper::{ElementRef, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Container landmark; only matched, never read.
    Node,
    Text,
    Attr(&'static str),
    InnerHtml,
}

pub struct Rule {
    pub css: &'static str,
    pub source: Source,
    compiled: OnceLock<Selector>,
}

impl Rule {
    pub const fn node(css: &'static str) -> Self {
        Self::new(css, Source::Node)
    }

    pub const fn text(css: &'static str) -> Self {
        Self::new(css, Source::Text)
    }

    pub const fn attr(css: &'static str, name: &'static str) -> Self {
        Self::new(css, Source::Attr(name))
    }

    pub const fn html(css: &'static str) -> Self {
        Self::new(css, Source::InnerHtml)
    }

    const fn new(css: &'static str, source: Source) -> Self {
        Rule {
            css,
            source,
            compiled: OnceLock::new(),
        }
    }

    pub fn selector(&self) -> &Selector {
        self.compiled.get_or_init(|| {
            Selector::parse(self.css)
                .unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", self.css, e))
        })
    }

    /// All matches below `scope`, in document order.
    pub fn all<'a, 'b>(&'b self, scope: ElementRef<'a>) -> Select<'a, 'b> {
        scope.select(self.selector())
    }

    pub fn first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.all(scope).next()
    }

    pub fn exists(&self, scope: ElementRef<'_>) -> bool {
        self.first(scope).is_some()
    }

    /// Reads this rule's value from an already-matched node.
    /// `None` for container rules and for a missing attribute.
    pub fn read(&self, node: ElementRef<'_>) -> Option<String> {
        match self.source {
            Source::Node => None,
            Source::Text => Some(node.text().collect()),
            Source::Attr(name) => node.value().attr(name).map(str::to_string),
            Source::InnerHtml => Some(node.inner_html()),
        }
    }

    /// Value of the first match, `None` when the landmark is missing.
    pub fn first_value(&self, scope: ElementRef<'_>) -> Option<String> {
        self.first(scope).and_then(|node| self.read(node))
    }
}

/// Search result cards.
pub mod card {
    use super::Rule;

    pub static CARD: Rule = Rule::node(".card");
    pub static TITLE: Rule = Rule::text(".title");
    pub static ICON: Rule = Rule::attr(".cover-image", "src");
    pub static DEVELOPER: Rule = Rule::text(".subtitle");
    pub static RATING: Rule = Rule::attr(".current-rating", "style");
    pub static PRICE: Rule = Rule::text(".price-container button.price");
}

/// App details page.
pub mod details {
    use super::Rule;

    pub static PAGE_TITLE: Rule = Rule::text("title");
    pub static TITLE: Rule = Rule::text(".document-title > *");
    pub static ICON: Rule = Rule::attr(".details-info .cover-image", "src");
    pub static SCORE: Rule = Rule::text(".score-container .score");
    pub static REVIEWS: Rule = Rule::text(".score-container .reviews-num");
    pub static PRICE: Rule = Rule::attr(r#".details-info button.price.buy meta[itemprop="price"]"#, "content");
    pub static IN_APP: Rule = Rule::node(".inapp-msg");
    pub static SCREENSHOT: Rule = Rule::attr("img.screenshot", "src");
    pub static DEVELOPER: Rule = Rule::text(r#".document-subtitle.primary [itemprop="name"]"#);
    pub static CATEGORY: Rule = Rule::text(r#".category [itemprop="genre"]"#);
    pub static RATING_BAR: Rule = Rule::node(".rating-bar-container");
    pub static BAR_LABEL: Rule = Rule::text(".bar-label");
    pub static BAR_NUMBER: Rule = Rule::text(".bar-number");
    pub static DESCRIPTION: Rule = Rule::html(".details-section.description .id-app-orig-desc");
}

/// Label/value blocks of the "Additional information" panel.
pub mod meta {
    use super::Rule;

    pub static BLOCK: Rule = Rule::node(".meta-info");
    pub static LABEL: Rule = Rule::text(".title");
    pub static VALUE: Rule = Rule::text(".content");
    pub static LINK: Rule = Rule::attr(".content a", "href");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaField {
    Updated,
    Size,
    Installs,
    CurrentVersion,
    RequiresAndroid,
    ContentRating,
    ContactDeveloper,
}

pub const META_LABELS: &[(&str, MetaField)] = &[
    ("Updated", MetaField::Updated),
    ("Size", MetaField::Size),
    ("Installs", MetaField::Installs),
    ("Current Version", MetaField::CurrentVersion),
    ("Requires Android", MetaField::RequiresAndroid),
    ("Content Rating", MetaField::ContentRating),
    ("Contact Developer", MetaField::ContactDeveloper),
];

impl MetaField {
    pub fn from_label(label: &str) -> Option<Self> {
        lookup_label(META_LABELS, label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactLink {
    Website,
    Email,
}

pub const CONTACT_LABELS: &[(&str, ContactLink)] = &[
    ("Visit Developer's Website", ContactLink::Website),
    ("Email Developer", ContactLink::Email),
];

impl ContactLink {
    pub fn from_label(label: &str) -> Option<Self> {
        lookup_label(CONTACT_LABELS, label)
    }
}

fn lookup_label<T: Copy>(table: &[(&str, T)], label: &str) -> Option<T> {
    table
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, handler)| *handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_rules() -> Vec<&'static Rule> {
        vec![
            &card::CARD,
            &card::TITLE,
            &card::ICON,
            &card::DEVELOPER,
            &card::RATING,
            &card::PRICE,
            &details::PAGE_TITLE,
            &details::TITLE,
            &details::ICON,
            &details::SCORE,
            &details::REVIEWS,
            &details::PRICE,
            &details::IN_APP,
            &details::SCREENSHOT,
            &details::DEVELOPER,
            &details::CATEGORY,
            &details::RATING_BAR,
            &details::BAR_LABEL,
            &details::BAR_NUMBER,
            &details::DESCRIPTION,
            &meta::BLOCK,
            &meta::LABEL,
            &meta::VALUE,
            &meta::LINK,
        ]
    }

    #[test]
    fn every_selector_compiles() {
        for rule in all_rules() {
            assert!(Selector::parse(rule.css).is_ok(), "bad selector: {}", rule.css);
            let _ = rule.selector();
        }
    }

    #[test]
    fn container_rules_have_no_value() {
        let html = scraper::Html::parse_document(
            r#"<div class="inapp-msg">Offers in-app purchases</div>"#,
        );
        let root = html.root_element();
        assert!(details::IN_APP.exists(root));
        assert_eq!(details::IN_APP.first_value(root), None);

        let titled = scraper::Html::parse_document("<title>Hi</title>");
        let title = details::PAGE_TITLE.first_value(titled.root_element());
        assert_eq!(title.as_deref(), Some("Hi"));
    }

    #[test]
    fn meta_labels_exact_match() {
        assert_eq!(MetaField::from_label("Updated"), Some(MetaField::Updated));
        assert_eq!(MetaField::from_label("Current Version"), Some(MetaField::CurrentVersion));
        assert_eq!(MetaField::from_label("updated"), None);
        assert_eq!(MetaField::from_label("Permissions"), None);
    }

    #[test]
    fn contact_labels() {
        assert_eq!(ContactLink::from_label("Email Developer"), Some(ContactLink::Email));
        assert_eq!(
            ContactLink::from_label("Visit Developer's Website"),
            Some(ContactLink::Website)
        );
        assert_eq!(ContactLink::from_label("Privacy Policy"), None);
    }
}
