//! HTTP feed source.
//!
//! Downloads the feed document with a blocking client. Connection failures,
//! timeouts, 429 and 5xx responses are retried with exponential backoff;
//! any other non-success status fails immediately.

use super::config::FeedConfig;
use super::error::FetchError;
use super::source::FeedSource;
use std::time::Duration;
use tracing::{debug, warn};

/// Feed source backed by an HTTP GET of the configured URL.
pub struct HttpFeedSource {
    client: reqwest::blocking::Client,
    url: String,
    max_retries: u32,
    base_delay: Duration,
}

impl HttpFeedSource {
    pub fn new(config: &FeedConfig) -> Result<Self, FetchError> {
        config.validate()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| FetchError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            max_retries: config.max_retries,
            base_delay: config.retry_base_delay(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Backoff before retry number `attempt` (1-based).
    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    /// Backoff before retry `attempt`, stretched to at least the host's
    /// `Retry-After` when the previous response carried one.
    fn retry_delay(&self, attempt: u32, retry_after: Option<Duration>) -> Duration {
        let backoff = self.delay_for(attempt);
        retry_after.map_or(backoff, |requested| requested.max(backoff))
    }

    fn fetch_with_retry(&self) -> Result<Vec<u8>, FetchError> {
        let mut last_error = None;
        let mut retry_after = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_delay(attempt, retry_after.take());
                debug!(attempt, ?delay, url = %self.url, "retrying feed download");
                std::thread::sleep(delay);
            }

            match self.client.get(&self.url).send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        let retry_after_secs = resp
                            .headers()
                            .get(reqwest::header::RETRY_AFTER)
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        warn!(retry_after_secs, "feed host rate limited the request");
                        retry_after = Some(Duration::from_secs(retry_after_secs));
                        last_error = Some(FetchError::RateLimited { retry_after_secs });
                        continue;
                    }

                    if status.is_server_error() {
                        warn!(status = status.as_u16(), "feed host returned a server error");
                        last_error = Some(FetchError::HttpStatus {
                            status: status.as_u16(),
                            url: self.url.clone(),
                        });
                        continue;
                    }

                    if !status.is_success() {
                        return Err(FetchError::HttpStatus {
                            status: status.as_u16(),
                            url: self.url.clone(),
                        });
                    }

                    let body = resp
                        .bytes()
                        .map_err(|e| FetchError::NetworkUnreachable(e.to_string()))?;
                    debug!(bytes = body.len(), url = %self.url, "downloaded feed");
                    return Ok(body.to_vec());
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        warn!(error = %e, "feed download failed");
                        last_error = Some(FetchError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(FetchError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| FetchError::NetworkUnreachable("max retries exceeded".into())))
    }
}

impl FeedSource for HttpFeedSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        self.fetch_with_retry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        let source = HttpFeedSource::new(&FeedConfig::default()).unwrap();
        assert_eq!(source.url(), super::super::config::DEFAULT_FEED_URL);
        assert_eq!(source.name(), "http");
    }

    #[test]
    fn rejects_invalid_config() {
        let config = FeedConfig {
            url: "file:///tmp/feed.xml".into(),
            ..FeedConfig::default()
        };
        assert!(matches!(HttpFeedSource::new(&config), Err(FetchError::Config(_))));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let config = FeedConfig {
            retry_base_delay_ms: 100,
            ..FeedConfig::default()
        };
        let source = HttpFeedSource::new(&config).unwrap();
        assert_eq!(source.delay_for(1), Duration::from_millis(100));
        assert_eq!(source.delay_for(2), Duration::from_millis(200));
        assert_eq!(source.delay_for(3), Duration::from_millis(400));
    }

    #[test]
    fn retry_after_stretches_the_backoff() {
        let config = FeedConfig {
            retry_base_delay_ms: 100,
            ..FeedConfig::default()
        };
        let source = HttpFeedSource::new(&config).unwrap();
        assert_eq!(source.retry_delay(1, None), Duration::from_millis(100));
        assert_eq!(
            source.retry_delay(1, Some(Duration::from_secs(60))),
            Duration::from_secs(60)
        );
        // A shorter request never undercuts the exponential backoff.
        assert_eq!(
            source.retry_delay(3, Some(Duration::from_millis(50))),
            Duration::from_millis(400)
        );
    }
}
