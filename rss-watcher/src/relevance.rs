use tracing::debug;

use crate::types::FeedItem;

/// Case-insensitive relevance terms. An empty set lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Build from a space-separated keyword string, e.g. `"app rust 软件"`.
    pub fn parse(raw: &str) -> Self {
        Self::from_keywords(raw.split_whitespace())
    }

    pub fn from_keywords<I, K>(keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !unique.contains(&keyword) {
                unique.push(keyword);
            }
        }
        Self { keywords: unique }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when any keyword occurs in the title, or in the content, or in
    /// the summary when the item has no content.
    pub fn matches(&self, item: &FeedItem) -> bool {
        if self.is_empty() {
            return true;
        }

        let title = item.title.as_deref().map(str::to_lowercase);
        let body = item.body().map(str::to_lowercase);

        self.keywords.iter().any(|keyword| {
            title.as_deref().is_some_and(|t| t.contains(keyword.as_str()))
                || body.as_deref().is_some_and(|b| b.contains(keyword.as_str()))
        })
    }

    pub fn filter(&self, items: Vec<FeedItem>) -> Vec<FeedItem> {
        if self.is_empty() {
            return items;
        }

        let total = items.len();
        let kept: Vec<FeedItem> = items.into_iter().filter(|item| self.matches(item)).collect();
        debug!(
            "Keyword filter kept {}/{} items ({:?})",
            kept.len(),
            total,
            self.keywords
        );
        kept
    }
}
