use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::fetch::Fetch;
use crate::models::{AppSummary, LanguageCode};
use crate::parser::extract::parse_cards;
use crate::parser::Page;
use crate::store::PlayStore;

/// Summaries served per search request.
pub const PAGE_SIZE: i64 = 20;

/// The upstream `num` parameter returns twice as many results as asked for,
/// so each request sends `PAGE_SIZE / UPSTREAM_NUM_DIVISOR` to get a full page.
pub const UPSTREAM_NUM_DIVISOR: i64 = 2;

const SEARCH_PATH: &str = "search";
const APPS_ONLY: &str = "apps";

/// Number of page requests needed to cover `limit` results.
pub fn page_count(limit: i64) -> Result<i64> {
    if limit <= 0 {
        return Err(Error::InvalidLimit(limit));
    }
    Ok((limit - 1) / PAGE_SIZE + 1)
}

impl<F: Fetch> PlayStore<F> {
    pub fn search_url(&self, term: &str, page: i64, lang: &LanguageCode) -> Result<Url> {
        let start = (page * PAGE_SIZE).to_string();
        let num = (PAGE_SIZE / UPSTREAM_NUM_DIVISOR).to_string();
        self.url(
            SEARCH_PATH,
            &[
                ("q", term),
                ("start", start.as_str()),
                ("num", num.as_str()),
                ("c", APPS_ONLY),
                ("hl", lang.as_str()),
            ],
        )
    }

    /// Pages through search results one request at a time. Any transport
    /// failure aborts the whole search. The result is not truncated to
    /// `limit`; the last page may overshoot it.
    pub async fn search(
        &self,
        term: &str,
        limit: i64,
        lang: &LanguageCode,
    ) -> Result<Vec<AppSummary>> {
        let pages = page_count(limit)?;
        let mut results = Vec::new();

        for page in 0..pages {
            let url = self.search_url(term, page, lang)?;
            let body = match self.get(&url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        "Search {:?} aborted on page {}/{}, dropping {} results: {}",
                        term,
                        page + 1,
                        pages,
                        results.len(),
                        e
                    );
                    return Err(e);
                }
            };
            let cards = read_cards(&body);
            debug!("Search {:?} page {}: {} cards", term, page + 1, cards.len());
            results.extend(cards);
        }

        info!("Search {:?}: {} results over {} page(s)", term, results.len(), pages);
        Ok(results)
    }
}

fn read_cards(body: &str) -> Vec<AppSummary> {
    parse_cards(&Page::parse(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT;
    use crate::error::FetchError;
    use crate::fetch::mock::MockFetcher;

    fn store(fetcher: MockFetcher) -> PlayStore<MockFetcher> {
        PlayStore::new(fetcher, DEFAULT_ENDPOINT).unwrap()
    }

    fn query(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn pages_for_limit() {
        assert_eq!(page_count(1).unwrap(), 1);
        assert_eq!(page_count(20).unwrap(), 1);
        assert_eq!(page_count(21).unwrap(), 2);
        assert_eq!(page_count(25).unwrap(), 2);
        assert_eq!(page_count(40).unwrap(), 2);
        assert_eq!(page_count(41).unwrap(), 3);
        assert_eq!(page_count(i64::MAX).unwrap(), (i64::MAX - 1) / 20 + 1);
        assert!(matches!(page_count(0), Err(Error::InvalidLimit(0))));
        assert!(matches!(page_count(-5), Err(Error::InvalidLimit(-5))));
    }

    #[tokio::test]
    async fn invalid_limit_makes_no_request() {
        let store = store(MockFetcher::new().with_fixture("start=0", "search_page1"));
        for limit in [0, -1] {
            let err = store.search("video", limit, &LanguageCode::english()).await.unwrap_err();
            assert!(matches!(err, Error::InvalidLimit(l) if l == limit));
        }
        assert!(store.fetcher().requested().is_empty());
    }

    #[tokio::test]
    async fn limit_one_single_page() {
        let store = store(MockFetcher::new().with_fixture("start=0", "search_page1"));
        let results = store.search("video player", 1, &LanguageCode::english()).await.unwrap();

        let requests = store.fetcher().requested();
        assert_eq!(requests.len(), 1);
        let url = &requests[0];
        assert_eq!(url.path(), "/store/search");
        assert_eq!(query(url, "q").as_deref(), Some("video player"));
        assert_eq!(query(url, "start").as_deref(), Some("0"));
        assert_eq!(query(url, "num").as_deref(), Some("10"));
        assert_eq!(query(url, "c").as_deref(), Some("apps"));
        assert_eq!(query(url, "hl").as_deref(), Some("en"));

        // every card on the page, not truncated to the limit
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].average_rating, 4.0);
    }

    #[tokio::test]
    async fn limit_25_two_pages_in_order() {
        let store = store(
            MockFetcher::new()
                .with_fixture("start=0", "search_page1")
                .with_fixture("start=20", "search_page2"),
        );
        let es: LanguageCode = "es".parse().unwrap();
        let results = store.search("video", 25, &es).await.unwrap();

        let requests = store.fetcher().requested();
        assert_eq!(requests.len(), 2);
        let starts: Vec<_> = requests.iter().map(|u| query(u, "start").unwrap()).collect();
        assert_eq!(starts, vec!["0", "20"]);
        assert!(requests.iter().all(|u| query(u, "hl").as_deref() == Some("es")));

        let titles: Vec<_> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["YouTube", "Video Player Pro", "Clips", "Tube Lite"]);
    }

    #[tokio::test]
    async fn transport_failure_aborts() {
        let store = store(
            MockFetcher::new()
                .with_fixture("start=0", "search_page1")
                .failing("start=20", FetchError::Network("timed out".into()))
                .with_fixture("start=40", "search_page2"),
        );
        let err = store.search("video", 60, &LanguageCode::english()).await.unwrap_err();
        assert!(matches!(err, Error::Transport(FetchError::Network(_))));
        // page 3 never requested
        assert_eq!(store.fetcher().requested().len(), 2);
    }

    #[tokio::test]
    async fn empty_page_is_not_an_error() {
        let store = store(
            MockFetcher::new()
                .with_fixture("start=0", "search_page1")
                .with("start=20", "<html><body>No results</body></html>"),
        );
        let results = store.search("video", 40, &LanguageCode::english()).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(store.fetcher().requested().len(), 2);
    }
}
