#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rss_watcher::{
    FeedItem, FeedSource, NotificationHost, NotificationPayload, ParsedFeed, Result, Storage,
    WatcherError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

/// Item whose identity is `id` and whose link is derived from it.
pub fn item(id: &str, title: &str) -> FeedItem {
    FeedItem {
        guid: Some(id.to_string()),
        title: Some(title.to_string()),
        link: Some(format!("https://example.com/{}", id)),
        ..FeedItem::default()
    }
}

pub fn item_at(id: &str, published_secs: i64) -> FeedItem {
    FeedItem {
        published_at: Some(ts(published_secs)),
        ..item(id, id)
    }
}

pub fn seen_json(ids: &[&str]) -> String {
    serde_json::to_string(ids).unwrap()
}

/// Feed source serving a list that tests can swap between ticks. Clones
/// share the same list.
#[derive(Clone)]
pub struct StaticSource {
    url: String,
    items: Arc<Mutex<Vec<FeedItem>>>,
    pulls: Arc<AtomicUsize>,
}

impl StaticSource {
    pub fn new(url: &str, items: Vec<FeedItem>) -> Self {
        Self {
            url: url.to_string(),
            items: Arc::new(Mutex::new(items)),
            pulls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_items(&self, items: Vec<FeedItem>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn pull_count(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for StaticSource {
    fn source_url(&self) -> &str {
        &self.url
    }

    async fn pull(&self) -> Result<ParsedFeed> {
        self.pulls.fetch_add(1, Ordering::SeqCst);
        Ok(ParsedFeed {
            title: Some("Static".to_string()),
            items: self.items.lock().unwrap().clone(),
        })
    }
}

/// Holds every pull of `inner` back by `delay`, then appends the source URL
/// to `finished`.
pub struct DelayedSource<S> {
    pub inner: S,
    pub delay: Duration,
    pub finished: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl<S: FeedSource> FeedSource for DelayedSource<S> {
    fn source_url(&self) -> &str {
        self.inner.source_url()
    }

    async fn pull(&self) -> Result<ParsedFeed> {
        tokio::time::sleep(self.delay).await;
        let feed = self.inner.pull().await;
        self.finished
            .lock()
            .unwrap()
            .push(self.source_url().to_string());
        feed
    }
}

/// Feed source that always fails like an unreachable host.
pub struct FailingSource {
    pub url: String,
}

#[async_trait]
impl FeedSource for FailingSource {
    fn source_url(&self) -> &str {
        &self.url
    }

    async fn pull(&self) -> Result<ParsedFeed> {
        Err(WatcherError::HttpStatus {
            url: self.url.clone(),
            status: 503,
        })
    }
}

/// Storage whose reads or writes can be made to fail.
#[derive(Default)]
pub struct FlakyStorage {
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub stored: Mutex<Option<String>>,
    pub write_attempts: AtomicUsize,
}

#[async_trait]
impl Storage for FlakyStorage {
    async fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
        if self.fail_reads {
            anyhow::bail!("disk unavailable");
        }
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn set_item(&self, _key: &str, value: &str) -> anyhow::Result<()> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            anyhow::bail!("disk full");
        }
        *self.stored.lock().unwrap() = Some(value.to_string());
        Ok(())
    }
}

/// Host that remembers every delivered payload.
#[derive(Default)]
pub struct RecordingHost {
    pub delivered: Mutex<Vec<NotificationPayload>>,
}

#[async_trait]
impl NotificationHost for RecordingHost {
    async fn deliver(&self, payload: &NotificationPayload) -> anyhow::Result<()> {
        self.delivered.lock().unwrap().push(payload.clone());
        Ok(())
    }
}
