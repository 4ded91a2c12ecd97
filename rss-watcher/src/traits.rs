use crate::types::{ParsedFeed, Result};
use async_trait::async_trait;

/// Trait for pulling a feed document from a source (RSS feeds, fixtures, etc.)
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Location of this source, used in logs and errors
    fn source_url(&self) -> &str;

    /// Fetch and parse the current feed. Any failure aborts the tick.
    async fn pull(&self) -> Result<ParsedFeed>;
}
