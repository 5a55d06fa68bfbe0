//! App metadata from marketplace HTML pages: lookup by package id (with
//! per-language descriptions) and paged keyword search.

pub mod config;
pub mod error;
pub mod fetch;
pub mod lookup;
pub mod models;
pub mod parser;
pub mod search;
pub mod store;

pub use error::{Error, FetchError, Result};
pub use fetch::{Fetch, HttpFetcher};
pub use models::{
    AppRecord, AppSummary, DeveloperContact, LanguageCode, LocalizedRecord, MissingLanguage,
    MissingReason,
};
pub use store::PlayStore;
