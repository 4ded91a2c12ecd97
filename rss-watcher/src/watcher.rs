use crate::config::WatcherConfig;
use crate::digest::{DigestFormatter, OutputMode, WatchOutput};
use crate::history::HistoryStore;
use crate::merge::merge;
use crate::relevance::KeywordSet;
use crate::sources::RssFeedSource;
use crate::traits::FeedSource;
use crate::types::{FeedItem, NotificationHost, Result, Storage, WatcherError};
use crate::Fetcher;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Runs one change-detection pass per tick over a fixed set of sources.
///
/// A tick fetches every source, merges the results, drops what the seen
/// history already knows, records the rest, applies the keyword filter and
/// shapes the survivors into notifications. Any failure before the history
/// is written leaves storage untouched.
pub struct ChangeDetector<S> {
    sources: Vec<Box<dyn FeedSource>>,
    history: HistoryStore<S>,
    keywords: KeywordSet,
    formatter: DigestFormatter,
}

impl<S: Storage> ChangeDetector<S> {
    pub fn new(storage: S, keywords: KeywordSet, mode: OutputMode) -> Self {
        Self {
            sources: Vec::new(),
            history: HistoryStore::new(storage),
            keywords,
            formatter: DigestFormatter::new(mode),
        }
    }

    /// Build a detector polling every configured URL over HTTP.
    pub fn from_config(config: &WatcherConfig, storage: S) -> Result<Self> {
        config.validate()?;

        let fetcher = Arc::new(Fetcher::new(config.fetch.clone())?);
        let mut detector = Self::new(storage, config.keyword_set(), config.mode);
        for url in &config.sources {
            detector.add_source(Box::new(RssFeedSource::new(url.clone(), fetcher.clone())));
        }
        Ok(detector)
    }

    pub fn add_source(&mut self, source: Box<dyn FeedSource>) {
        info!("Adding source to watcher: {}", source.source_url());
        self.sources.push(source);
    }

    pub fn with_source(mut self, source: Box<dyn FeedSource>) -> Self {
        self.add_source(source);
        self
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn storage(&self) -> &S {
        self.history.storage()
    }

    /// Pull every source concurrently. Results keep configuration order.
    async fn pull_all(&self) -> Result<Vec<Vec<FeedItem>>> {
        let pulls = self.sources.iter().map(|source| async move {
            source.pull().await.map_err(|e| {
                error!("Failed to pull {}: {}", source.source_url(), e);
                e
            })
        });

        let feeds = try_join_all(pulls).await?;
        Ok(feeds.into_iter().map(|feed| feed.items).collect())
    }

    /// Run one tick. Returns `None` when nothing new and relevant was found.
    pub async fn tick(&self) -> Result<Option<WatchOutput>> {
        if self.sources.is_empty() {
            return Err(WatcherError::Config("no sources configured".to_string()));
        }

        let per_source = self.pull_all().await?;
        let items = merge(per_source);
        debug!("Tick sees {} items across {} source(s)", items.len(), self.sources.len());

        let history = self.history.load().await?;
        let unseen = history.compute_unseen(&items);
        if unseen.is_empty() {
            info!("No new items");
            return Ok(None);
        }

        let updated = history.append_and_bound(&unseen);
        self.history.persist(&updated).await?;
        info!(
            "Recorded {} new item(s), history now holds {}",
            unseen.len(),
            updated.len()
        );

        let relevant = self.keywords.filter(unseen);
        if relevant.is_empty() {
            info!("No new items matched keywords {:?}", self.keywords.keywords());
            return Ok(None);
        }

        Ok(self.formatter.format(&relevant))
    }

    /// Run one tick and hand every resulting payload to `host`, in order.
    /// Returns the number of payloads delivered.
    pub async fn run_tick(&self, host: &dyn NotificationHost) -> Result<usize> {
        let Some(output) = self.tick().await? else {
            return Ok(0);
        };

        for payload in output.payloads() {
            host.deliver(payload)
                .await
                .map_err(WatcherError::Notification)?;
        }

        Ok(output.len())
    }
}
