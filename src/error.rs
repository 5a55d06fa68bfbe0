use thiserror::Error;

/// Failure reported by a [`crate::fetch::Fetch`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("request failed: {0}")]
    Network(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => FetchError::Network(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid app id: {0:?}")]
    InvalidIdentifier(String),
    #[error("invalid search limit: {0}")]
    InvalidLimit(i64),
    #[error("invalid language code: {0:?}")]
    InvalidLanguage(String),
    #[error("app not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Transport(#[from] FetchError),
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
