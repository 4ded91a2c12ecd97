use rss_watcher::rss_utils::url;
use rss_watcher::{FeedItem, FeedParser, Result, SeenHistory, WatcherError};

const RSS_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example Feed</title>
    <link>https://example.com</link>
    <description>Fixture feed</description>
    <item>
      <title>First post</title>
      <link>https://example.com/posts/1</link>
      <guid isPermaLink="false">urn:example:post:1</guid>
      <description>Summary one</description>
      <pubDate>Mon, 06 Jan 2025 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Second post</title>
      <link>https://example.com/posts/2</link>
      <description>&lt;p&gt;Summary two&lt;/p&gt;</description>
    </item>
    <item>
      <title>Orphan</title>
      <description>Neither guid nor link</description>
    </item>
  </channel>
</rss>"#;

const ATOM_FIXTURE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Example</title>
  <id>urn:example:feed</id>
  <updated>2025-01-07T08:00:00Z</updated>
  <entry>
    <title>Atom entry</title>
    <id>tag:example.com,2025:entry-1</id>
    <link href="https://example.com/atom/1"/>
    <updated>2025-01-07T08:00:00Z</updated>
    <content type="html">&lt;p&gt;Atom body&lt;/p&gt;</content>
  </entry>
</feed>"#;

const SHARED_LINK_FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Forum</title>
    <link>https://example.com/</link>
    <description>Every post links to the homepage</description>
    <item>
      <title>Thread one</title>
      <link>https://example.com/</link>
      <guid isPermaLink="false">post?id=1&amp;lang=en</guid>
    </item>
    <item>
      <title>Thread two</title>
      <link>https://example.com/</link>
      <guid isPermaLink="false">post?id=2&amp;lang=en</guid>
    </item>
    <item>
      <title>Thread three</title>
      <link>https://example.com/</link>
      <guid isPermaLink="false">&#x3C;3&#x3E; &lt;numeric&gt;</guid>
    </item>
  </channel>
</rss>"#;

#[test]
fn test_parse_rss_items() -> Result<()> {
    let feed = FeedParser::parse_feed(RSS_FIXTURE)?;

    assert_eq!(feed.title.as_deref(), Some("Example Feed"));
    assert_eq!(feed.items.len(), 3);

    let first = &feed.items[0];
    assert_eq!(first.guid.as_deref(), Some("urn:example:post:1"));
    assert_eq!(first.identity(), Some("urn:example:post:1"));
    assert_eq!(first.link.as_deref(), Some("https://example.com/posts/1"));
    assert_eq!(first.title.as_deref(), Some("First post"));
    assert!(first.summary.as_deref().unwrap_or("").contains("Summary one"));
    assert!(first.published_at.is_some());
    Ok(())
}

#[test]
fn test_missing_guid_falls_back_to_link() -> Result<()> {
    let feed = FeedParser::parse_feed(RSS_FIXTURE)?;

    let second = &feed.items[1];
    assert_eq!(second.guid, None);
    assert_eq!(second.identity(), Some("https://example.com/posts/2"));
    assert!(second.published_at.is_none());

    // identities are stable across parses
    let again = FeedParser::parse_feed(RSS_FIXTURE)?;
    assert_eq!(again.items[1].identity(), second.identity());
    Ok(())
}

#[test]
fn test_entry_without_guid_or_link_has_no_identity() -> Result<()> {
    let feed = FeedParser::parse_feed(RSS_FIXTURE)?;

    let orphan = &feed.items[2];
    assert_eq!(orphan.link, None);
    assert_eq!(orphan.identity(), None);
    Ok(())
}

#[test]
fn test_parse_atom_content_and_updated_timestamp() -> Result<()> {
    let feed = FeedParser::parse_feed(ATOM_FIXTURE)?;
    assert_eq!(feed.items.len(), 1);

    let entry = &feed.items[0];
    assert_eq!(entry.identity(), Some("tag:example.com,2025:entry-1"));
    assert_eq!(entry.link.as_deref(), Some("https://example.com/atom/1"));
    assert!(entry.content.as_deref().unwrap_or("").contains("Atom body"));
    assert!(entry.published_at.is_some());
    assert_eq!(entry.snippet().as_deref(), Some("Atom body"));
    Ok(())
}

#[test]
fn test_escaped_guids_are_kept_as_identity() -> Result<()> {
    let feed = FeedParser::parse_feed(SHARED_LINK_FIXTURE)?;
    let ids: Vec<_> = feed.items.iter().filter_map(FeedItem::identity).collect();

    assert_eq!(
        ids,
        vec!["post?id=1&lang=en", "post?id=2&lang=en", "<3> <numeric>"]
    );
    assert!(feed
        .items
        .iter()
        .all(|i| i.link.as_deref() == Some("https://example.com/")));
    Ok(())
}

#[test]
fn test_items_sharing_a_link_are_all_unseen() -> Result<()> {
    let feed = FeedParser::parse_feed(SHARED_LINK_FIXTURE)?;

    let unseen = SeenHistory::new().compute_unseen(&feed.items);
    assert_eq!(unseen.len(), 3);
    Ok(())
}

#[test]
fn test_malformed_document_is_a_parse_error() {
    let result = FeedParser::parse_feed("definitely not a feed");
    assert!(matches!(result, Err(WatcherError::Parse(_))));
}

#[test]
fn test_feed_content_sniffing() {
    assert!(FeedParser::is_valid_feed_content(RSS_FIXTURE));
    assert!(FeedParser::is_valid_feed_content(ATOM_FIXTURE));
    assert!(!FeedParser::is_valid_feed_content("<html><body>Not found</body></html>"));
}

#[test]
fn test_feed_url_validation() {
    assert!(url::is_valid_rss_url("https://example.com/feed.xml"));
    assert!(url::is_valid_rss_url("http://example.com/rss"));
    assert!(!url::is_valid_rss_url("ftp://example.com/feed"));
    assert!(!url::is_valid_rss_url("invalid-url"));

    assert_eq!(
        url::extract_domain("https://sspai.com/feed"),
        Some("sspai.com".to_string())
    );
    assert_eq!(url::extract_domain("invalid-url"), None);
}
