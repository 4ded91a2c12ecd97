use std::cmp::Reverse;

use tracing::debug;

use crate::types::FeedItem;

/// Combine the items of every source into one sequence.
///
/// A single source is passed through in its native order. Several sources are
/// concatenated in configuration order and stable-sorted newest first; items
/// without a timestamp sort last.
pub fn merge(source_items: Vec<Vec<FeedItem>>) -> Vec<FeedItem> {
    if source_items.len() == 1 {
        return source_items.into_iter().flatten().collect();
    }

    let mut merged: Vec<FeedItem> = source_items.into_iter().flatten().collect();
    merged.sort_by_key(|item| Reverse(item.published_at));

    debug!("Merged {} items from multiple sources", merged.len());
    merged
}
