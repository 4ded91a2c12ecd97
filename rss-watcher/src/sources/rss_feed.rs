use crate::rss_utils::url::extract_domain;
use crate::traits::FeedSource;
use crate::types::{ParsedFeed, Result, WatcherError};
use crate::{FeedParser, Fetcher};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Generic RSS/Atom feed source backed by HTTP
pub struct RssFeedSource {
    url: String,
    fetcher: Arc<Fetcher>,
}

impl RssFeedSource {
    pub fn new(url: String, fetcher: Arc<Fetcher>) -> Self {
        Self { url, fetcher }
    }

    pub fn source_name(&self) -> String {
        match extract_domain(&self.url) {
            Some(domain) => format!("RSS Feed ({})", domain),
            None => "RSS Feed".to_string(),
        }
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    fn source_url(&self) -> &str {
        &self.url
    }

    async fn pull(&self) -> Result<ParsedFeed> {
        info!("Pulling {}: {}", self.source_name(), self.url);

        let content = self.fetcher.fetch_feed(&self.url).await?;

        if !FeedParser::is_valid_feed_content(&content) {
            error!("Response from {} does not look like a feed", self.url);
            return Err(WatcherError::Parse(format!(
                "{} did not return a feed document",
                self.url
            )));
        }

        let parsed_feed = FeedParser::parse_feed(&content).map_err(|e| {
            error!("Failed to parse RSS feed {}: {}", self.url, e);
            e
        })?;

        info!(
            "Successfully pulled {} items from {} ({})",
            parsed_feed.items.len(),
            self.url,
            parsed_feed.title.as_deref().unwrap_or("untitled feed")
        );
        Ok(parsed_feed)
    }
}
