use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{HeaderValue, ACCEPT_LANGUAGE};
use reqwest::StatusCode;
use url::Url;

use crate::config::Settings;
use crate::error::FetchError;

/// Transport seam: turns a fully-formed request URL into a response body.
/// Implementations decide timeouts and cancellation.
pub trait Fetch {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// reqwest-backed fetcher used by the binary.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let mut request = self.client.get(url.clone());
        if let Some(lang) = accept_language(url) {
            request = request.header(ACCEPT_LANGUAGE, lang);
        }
        let response = request.send().await?;
        check_status(response.status(), url)?;
        Ok(response.text().await?)
    }
}

/// `Accept-Language` for a request, taken from its `hl` parameter.
fn accept_language(url: &Url) -> Option<HeaderValue> {
    url.query_pairs()
        .find(|(k, _)| k == "hl")
        .and_then(|(_, v)| HeaderValue::from_str(&v).ok())
}

fn check_status(status: StatusCode, url: &Url) -> Result<(), FetchError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// Parses the configured endpoint, making sure joined paths stay below it.
pub fn endpoint_url(endpoint: &str) -> Result<Url, url::ParseError> {
    let trimmed = endpoint.trim_end_matches('/');
    Url::parse(&format!("{}/", trimmed))
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory fetcher keyed by `hl` (lookup) or `start` (search).
    #[derive(Default)]
    pub struct MockFetcher {
        responses: HashMap<String, Result<String, FetchError>>,
        pub requests: Mutex<Vec<Url>>,
    }

    impl MockFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, key: &str, body: &str) -> Self {
            self.responses.insert(key.to_string(), Ok(body.to_string()));
            self
        }

        pub fn with_fixture(self, key: &str, fixture: &str) -> Self {
            let body = std::fs::read_to_string(format!("tests/fixtures/{}.html", fixture)).unwrap();
            self.with(key, &body)
        }

        pub fn failing(mut self, key: &str, err: FetchError) -> Self {
            self.responses.insert(key.to_string(), Err(err));
            self
        }

        pub fn requested(&self) -> Vec<Url> {
            self.requests.lock().unwrap().clone()
        }

        fn key_for(url: &Url) -> String {
            let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();
            if url.path().ends_with("/search") {
                format!("start={}", pairs.get("start").cloned().unwrap_or_default())
            } else {
                format!("hl={}", pairs.get("hl").cloned().unwrap_or_default())
            }
        }
    }

    impl Fetch for MockFetcher {
        async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
            self.requests.lock().unwrap().push(url.clone());
            self.responses
                .get(&Self::key_for(url))
                .cloned()
                .unwrap_or_else(|| {
                    Err(FetchError::Status {
                        status: 404,
                        url: url.to_string(),
                    })
                })
        }
    }
}
