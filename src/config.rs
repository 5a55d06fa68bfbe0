use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://play.google.com/store";
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings. Defaults are overridden by `PLAY_*` environment variables
/// (`PLAY_ENDPOINT`, `PLAY_USER_AGENT`, `PLAY_TIMEOUT_SECS`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_source(config::Environment::with_prefix("PLAY"))
    }

    fn from_source<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .add_source(source)
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
