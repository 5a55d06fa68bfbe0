use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::models::{
    AppRecord, Description, LanguageCode, LocalizedRecord, MissingLanguage, MissingReason,
};
use crate::parser::extract::{assemble_record, extract_description};
use crate::parser::Page;
use crate::store::PlayStore;

static APP_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_][\w.]*$").unwrap());

const DETAILS_PATH: &str = "apps/details";

/// Package names: letter or underscore, then word characters and dots.
pub fn validate_app_id(app_id: &str) -> Result<()> {
    if APP_ID_RE.is_match(app_id) {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier(app_id.to_string()))
    }
}

impl<F: Fetch> PlayStore<F> {
    pub fn details_url(&self, app_id: &str, lang: &LanguageCode) -> Result<Url> {
        self.url(DETAILS_PATH, &[("id", app_id), ("hl", lang.as_str())])
    }

    /// Full record from the English details page. Always exactly one request.
    pub async fn lookup(&self, app_id: &str) -> Result<AppRecord> {
        validate_app_id(app_id)?;
        let url = self.details_url(app_id, &LanguageCode::english())?;
        let body = self.get(&url).await?;
        read_record(&body, app_id)
    }

    /// [`lookup`](Self::lookup) plus one request per extra language for its
    /// description. Extra languages are best effort: a failure only lands the
    /// language in `missing`.
    pub async fn lookup_languages(
        &self,
        app_id: &str,
        languages: &[LanguageCode],
    ) -> Result<LocalizedRecord> {
        let mut app = self.lookup(app_id).await?;
        let mut missing = Vec::new();
        let mut seen = HashSet::new();

        for lang in languages {
            if lang.is_english() || !seen.insert(lang) {
                continue;
            }
            match self.fetch_description(app_id, lang).await {
                Ok(description) => {
                    app.insert_description(lang, description);
                    debug!("Added {} description for {}", lang, app_id);
                }
                Err(reason) => {
                    warn!("No {} description for {}: {}", lang, app_id, reason);
                    missing.push(MissingLanguage {
                        lang: lang.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            "Looked up {} in {} language(s), {} missing",
            app_id,
            app.languages().len(),
            missing.len()
        );
        Ok(LocalizedRecord { app, missing })
    }

    async fn fetch_description(
        &self,
        app_id: &str,
        lang: &LanguageCode,
    ) -> std::result::Result<Description, MissingReason> {
        let transport = |e: Error| MissingReason::Transport {
            message: e.to_string(),
        };
        let url = self.details_url(app_id, lang).map_err(transport)?;
        let body = self.get(&url).await.map_err(transport)?;
        read_description(&body, lang)
    }
}

fn read_record(body: &str, app_id: &str) -> Result<AppRecord> {
    let page = Page::parse(body);
    if page.is_not_found() {
        return Err(Error::NotFound(app_id.to_string()));
    }
    let en = LanguageCode::english();
    let mut app = assemble_record(&page, &en);
    // The request asked for English, so "en" is always present.
    if app.insert_description(&en, Description::default()) {
        debug!(
            "{} page declared {:?}, stored empty en description",
            app_id,
            page.declared_language()
        );
    }
    Ok(app)
}

fn read_description(
    body: &str,
    lang: &LanguageCode,
) -> std::result::Result<Description, MissingReason> {
    let page = Page::parse(body);
    if page.is_not_found() {
        return Err(MissingReason::NotFound);
    }
    extract_description(&page, lang).ok_or_else(|| MissingReason::LanguageMismatch {
        served: page.declared_language().map(str::to_string),
    })
}
