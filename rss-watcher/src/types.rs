use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rss_utils::feed::{extract_text_from_html, smart_truncate};

pub use interfaces::defs::{NotificationHost, NotificationLink, NotificationPayload, Storage};

/// Maximum number of identities retained in the seen history.
pub const HISTORY_BOUND: usize = 10_000;

/// Maximum number of preview links carried by a digest notification.
pub const PREVIEW_BOUND: usize = 3;

/// Length, in characters, of the snippet used as a link description.
pub const SNIPPET_CHARS: usize = 200;

/// Storage key holding the seen history.
pub const SEEN_KEY: &str = "seen";

/// One syndication entry as delivered by a feed source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl FeedItem {
    /// Canonical identity: the feed-provided id, falling back to the link.
    /// Blank values count as absent.
    pub fn identity(&self) -> Option<&str> {
        non_blank(self.guid.as_deref()).or_else(|| non_blank(self.link.as_deref()))
    }

    /// Full body text: content when present, otherwise the summary.
    pub fn body(&self) -> Option<&str> {
        self.content.as_deref().or(self.summary.as_deref())
    }

    /// Body as plain text. Content that strips to nothing, such as a lone
    /// `<img>`, gives way to the summary.
    pub fn body_text(&self) -> Option<String> {
        [self.content.as_deref(), self.summary.as_deref()]
            .into_iter()
            .flatten()
            .map(extract_text_from_html)
            .find(|text| !text.is_empty())
    }

    /// Short plain-text excerpt of the body.
    pub fn snippet(&self) -> Option<String> {
        self.body_text()
            .map(|text| smart_truncate(&text, SNIPPET_CHARS))
    }

    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or("Untitled")
    }

    /// URL shown to the user. Items without a link point at their id.
    pub fn display_url(&self) -> Option<&str> {
        non_blank(self.link.as_deref()).or_else(|| self.identity())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "RSS-Watcher/1.0".to_string(),
            timeout_seconds: 30,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Feed size exceeds limit: {size_mb}MB ({url})")]
    FeedTooLarge { url: String, size_mb: usize },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Storage error: {0:#}")]
    Storage(anyhow::Error),

    #[error("Notification error: {0:#}")]
    Notification(anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WatcherError>;
