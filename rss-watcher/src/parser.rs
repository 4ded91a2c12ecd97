use crate::types::{FeedItem, ParsedFeed, Result, WatcherError};
use chrono::Utc;
use feed_rs::parser;
use tracing::{debug, info};

/// Turns RSS/Atom/JSON Feed documents into [`FeedItem`]s.
pub struct FeedParser;

impl FeedParser {
    pub fn parse_feed(content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        // Entries without a <guid>/<id> keep an empty id instead of the
        // hash or UUID feed-rs would otherwise fill in.
        let feed = parser::Builder::new()
            .id_generator(|_links, _title, _uri| String::new())
            .build()
            .parse(content.as_bytes())
            .map_err(|e| WatcherError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);

        let items: Vec<FeedItem> = feed.entries.into_iter().map(Self::parse_entry).collect();

        info!("Parsed feed with {} entries", items.len());

        Ok(ParsedFeed { title, items })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> FeedItem {
        let link = entry.links.first().map(|l| l.href.clone());
        let guid = Some(entry.id).filter(|id| !id.trim().is_empty());

        let title = entry.title.map(|t| t.content);
        let summary = entry.summary.map(|s| s.content);
        let content = entry.content.and_then(|c| c.body);

        let published_at = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.with_timezone(&Utc));

        FeedItem {
            guid,
            title,
            link,
            content,
            summary,
            published_at,
        }
    }

    /// Basic check whether content might be a valid RSS/Atom feed
    pub fn is_valid_feed_content(content: &str) -> bool {
        let content_lower = content.to_lowercase();

        content_lower.contains("<rss")
            || content_lower.contains("<feed")
            || content_lower.contains("<rdf:rdf")
            || content_lower.contains("<channel")
            || content_lower.trim_start().starts_with('{')
    }
}
