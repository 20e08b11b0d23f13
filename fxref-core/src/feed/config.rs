//! TOML configuration for retrieving the feed.
//!
//! ```toml
//! [feed]
//! url = "https://expenses.cash/eurofxref/eurofxref.xml"
//! timeout_secs = 30
//! max_retries = 3
//! retry_base_delay_ms = 500
//! user_agent = "fxref/0.1"
//! ```
//!
//! Every key is optional; missing keys take the defaults above.

use super::error::FetchError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://expenses.cash/eurofxref/eurofxref.xml";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path).map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, FetchError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| FetchError::Config(format!("parse config TOML: {e}")))?;
        config.feed.validate()?;
        Ok(config)
    }
}

/// Settings for the HTTP feed source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub user_agent: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 500,
            user_agent: concat!("fxref/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }

    pub fn validate(&self) -> Result<(), FetchError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(FetchError::Config(format!(
                "feed url must be http(s): '{}'",
                self.url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(FetchError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
