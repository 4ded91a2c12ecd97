use crate::types::{FetchConfig, Result, WatcherError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Downloads raw feed documents. Failures are returned as-is; the caller
/// decides whether the tick survives them.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Download `url` and return the response body.
    pub async fn fetch_feed(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();

        Url::parse(url)?;
        debug!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                "Feed {} answered HTTP {}: {}",
                url,
                status,
                status.canonical_reason().unwrap_or("Unknown")
            );
            return Err(WatcherError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(content_length) = response.content_length() {
            self.check_size(url, content_length as usize)?;
        }

        let content = response.text().await?;
        self.check_size(url, content.len())?;

        info!(
            "Successfully fetched feed: {} ({} bytes in {}ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );

        Ok(content)
    }

    fn check_size(&self, url: &str, bytes: usize) -> Result<()> {
        if bytes > self.config.max_feed_size_mb * 1024 * 1024 {
            return Err(WatcherError::FeedTooLarge {
                url: url.to_string(),
                size_mb: bytes / (1024 * 1024),
            });
        }
        Ok(())
    }
}
