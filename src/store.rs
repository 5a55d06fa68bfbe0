use tracing::info;
use url::Url;

use crate::error::Result;
use crate::fetch::{endpoint_url, Fetch};

/// Marketplace handle: an injected transport plus the endpoint every request
/// URL is built on. Lookup and search live in their own modules.
pub struct PlayStore<F> {
    fetcher: F,
    endpoint: Url,
}

impl<F: Fetch> PlayStore<F> {
    pub fn new(fetcher: F, endpoint: &str) -> Result<Self> {
        Ok(PlayStore {
            fetcher,
            endpoint: endpoint_url(endpoint)?,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.endpoint.join(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    /// One request, no retry. Transport errors pass through untouched.
    pub(crate) async fn get(&self, url: &Url) -> Result<String> {
        info!("Fetching {}", url);
        Ok(self.fetcher.fetch(url).await?)
    }
}
