use crate::digest::OutputMode;
use crate::relevance::KeywordSet;
use crate::rss_utils::url::is_valid_rss_url;
use crate::types::{FetchConfig, Result, WatcherError};

/// Deployment-time settings of one watcher.
#[derive(Debug, Clone, Default)]
pub struct WatcherConfig {
    pub sources: Vec<String>,
    /// Space-separated keywords; `None` or blank disables filtering.
    pub keywords: Option<String>,
    pub mode: OutputMode,
    pub fetch: FetchConfig,
}

impl WatcherConfig {
    pub fn new(sources: Vec<String>) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn keyword_set(&self) -> KeywordSet {
        self.keywords
            .as_deref()
            .map(KeywordSet::parse)
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(WatcherError::Config(
                "at least one feed URL is required".to_string(),
            ));
        }
        if let Some(bad) = self.sources.iter().find(|s| !is_valid_rss_url(s)) {
            return Err(WatcherError::Config(format!(
                "not an http(s) feed URL: {}",
                bad
            )));
        }
        if self.fetch.timeout_seconds == 0 {
            return Err(WatcherError::Config(
                "fetch timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
