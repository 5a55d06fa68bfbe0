use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

static LANG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,3}([-_][A-Za-z0-9]{1,8})*$").unwrap());

/// Review count value meaning "node present but not a number".
pub const UNPARSEABLE: i64 = -1;

/// Marketplace language tag (`hl` parameter and description map key).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn english() -> Self {
        LanguageCode("en".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_english(&self) -> bool {
        self.0 == "en"
    }

    /// True when the page's declared `<html lang>` is exactly this code.
    pub fn matches_served(&self, served: &str) -> bool {
        self.0 == served
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if LANG_RE.is_match(s) {
            Ok(LanguageCode(s.to_string()))
        } else {
            Err(Error::InvalidLanguage(s.to_string()))
        }
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LanguageCode> for String {
    fn from(lang: LanguageCode) -> Self {
        lang.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lightweight app representation returned by search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSummary {
    pub title: String,
    pub icon: Option<String>,
    pub average_rating: f64,
    pub developer: String,
    pub price: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperContact {
    pub email: String,
    pub website: String,
}

/// Full app representation returned by lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    #[serde(flatten)]
    pub summary: AppSummary,
    pub category: String,
    pub offers_in_app_purchases: bool,
    pub rating_histogram: BTreeMap<String, i64>,
    pub review_count: i64,
    pub screenshot_urls: Vec<String>,
    pub updated: String,
    pub version: String,
    pub size: String,
    pub requires_android: String,
    pub content_rating: String,
    pub installs: String,
    pub plain_description: BTreeMap<LanguageCode, String>,
    pub html_description: BTreeMap<LanguageCode, String>,
    pub developer_contact: DeveloperContact,
}

impl Default for AppRecord {
    fn default() -> Self {
        AppRecord {
            summary: AppSummary::default(),
            category: String::new(),
            offers_in_app_purchases: false,
            rating_histogram: BTreeMap::new(),
            review_count: UNPARSEABLE,
            screenshot_urls: Vec::new(),
            updated: String::new(),
            version: String::new(),
            size: String::new(),
            requires_android: String::new(),
            content_rating: String::new(),
            installs: String::new(),
            plain_description: BTreeMap::new(),
            html_description: BTreeMap::new(),
            developer_contact: DeveloperContact::default(),
        }
    }
}

impl AppRecord {
    /// `None` when the reviews node was missing or garbled.
    pub fn review_count(&self) -> Option<i64> {
        (self.review_count != UNPARSEABLE).then_some(self.review_count)
    }

    /// Languages with a description in both maps.
    pub fn languages(&self) -> Vec<&LanguageCode> {
        self.plain_description
            .keys()
            .filter(|lang| self.html_description.contains_key(*lang))
            .collect()
    }

    /// Adds a description unless the language already has one.
    /// Returns false when an existing entry was kept.
    pub fn insert_description(&mut self, lang: &LanguageCode, description: Description) -> bool {
        if self.plain_description.contains_key(lang) || self.html_description.contains_key(lang) {
            return false;
        }
        self.plain_description.insert(lang.clone(), description.plain);
        self.html_description.insert(lang.clone(), description.html);
        true
    }
}

/// Description text of one language variant of the details page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    pub plain: String,
    pub html: String,
}

/// Result of a multi-language lookup. Languages that could not be added are
/// listed in `missing` instead of failing the whole call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedRecord {
    pub app: AppRecord,
    pub missing: Vec<MissingLanguage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingLanguage {
    pub lang: LanguageCode,
    pub reason: MissingReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissingReason {
    Transport { message: String },
    NotFound,
    LanguageMismatch { served: Option<String> },
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingReason::Transport { message } => write!(f, "transport failure: {}", message),
            MissingReason::NotFound => f.write_str("page not found"),
            MissingReason::LanguageMismatch { served: Some(s) } => {
                write!(f, "page served in {:?}", s)
            }
            MissingReason::LanguageMismatch { served: None } => {
                f.write_str("page declares no language")
            }
        }
    }
}
