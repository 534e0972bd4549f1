use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_EVENTS_PATH: &str = "/api/v1/events";
pub const DEFAULT_FEED_TIMEOUT: Duration = Duration::from_millis(15_000);

pub const ENV_BASE_URL: &str = "SHAREFEED_BFF_BASE_URL";
pub const ENV_EVENTS_PATH: &str = "SHAREFEED_EVENTS_PATH";
pub const ENV_FEED_TIMEOUT_MS: &str = "SHAREFEED_FEED_TIMEOUT_MS";

/// Where the BFF lives and how long a feed fetch may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub events_path: String,
    pub feed_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            events_path: DEFAULT_EVENTS_PATH.to_string(),
            feed_timeout: DEFAULT_FEED_TIMEOUT,
            user_agent: format!("sharefeed/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Reads the process environment, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url);
        }
        if let Some(path) = lookup(ENV_EVENTS_PATH).filter(|v| !v.trim().is_empty()) {
            config = config.with_events_path(path);
        }
        if let Some(raw) = lookup(ENV_FEED_TIMEOUT_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{} must be milliseconds, got '{}'", ENV_FEED_TIMEOUT_MS, raw))
            })?;
            if ms == 0 {
                return Err(ConfigError::Invalid(format!("{} must be positive", ENV_FEED_TIMEOUT_MS)));
            }
            config.feed_timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_events_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into().trim().to_string();
        self.events_path = if path.starts_with('/') {
            path
        } else {
            format!("/{}", path)
        };
        self
    }

    pub fn with_feed_timeout(mut self, timeout: Duration) -> Self {
        self.feed_timeout = timeout;
        self
    }

    pub fn feed_url(&self, sort: crate::models::FeedSort) -> String {
        format!("{}/api/v1/feeds?sort={}", self.base_url, sort)
    }

    pub fn events_url(&self) -> String {
        format!("{}{}", self.base_url, self.events_path)
    }
}
