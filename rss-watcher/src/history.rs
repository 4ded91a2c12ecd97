use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::types::{FeedItem, Result, Storage, WatcherError, HISTORY_BOUND, SEEN_KEY};

/// Insertion-ordered set of identities with a fixed capacity.
///
/// Once the capacity is exceeded the oldest identities are evicted first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenHistory {
    order: VecDeque<String>,
    members: HashSet<String>,
    bound: usize,
}

impl SeenHistory {
    pub fn new() -> Self {
        Self::with_bound(HISTORY_BOUND)
    }

    pub fn with_bound(bound: usize) -> Self {
        Self {
            order: VecDeque::new(),
            members: HashSet::new(),
            bound,
        }
    }

    /// Build a history from previously persisted entries. Repeated identities
    /// keep their first position, and an oversized list is cut down to its
    /// newest `bound` entries.
    pub fn from_entries<I>(entries: I, bound: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut history = Self::with_bound(bound);
        for entry in entries {
            history.insert(entry);
        }
        history
    }

    /// Appends `identity` unless it is already present. Returns the number of
    /// entries evicted to stay within the bound.
    pub fn insert(&mut self, identity: String) -> usize {
        if self.members.contains(&identity) {
            return 0;
        }
        self.members.insert(identity.clone());
        self.order.push_back(identity);
        self.evict_overflow()
    }

    fn evict_overflow(&mut self) -> usize {
        let mut evicted = 0;
        while self.order.len() > self.bound {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
                evicted += 1;
            }
        }
        evicted
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.members.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Identities from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Items not present in the history, in input order.
    ///
    /// Items without an identity are dropped. When several items share an
    /// identity only the first one is kept.
    pub fn compute_unseen(&self, items: &[FeedItem]) -> Vec<FeedItem> {
        let mut seen_this_tick: HashSet<&str> = HashSet::new();
        let mut unseen = Vec::new();

        for item in items {
            let Some(identity) = item.identity() else {
                debug!("Skipping item without id or link: {:?}", item.title);
                continue;
            };
            if self.contains(identity) || !seen_this_tick.insert(identity) {
                continue;
            }
            unseen.push(item.clone());
        }

        unseen
    }

    /// New history: the current entries followed by the identities of
    /// `unseen`, truncated to the bound.
    pub fn append_and_bound(&self, unseen: &[FeedItem]) -> SeenHistory {
        let mut next = self.clone();
        let mut evicted = 0;
        for identity in unseen.iter().filter_map(FeedItem::identity) {
            evicted += next.insert(identity.to_owned());
        }
        if evicted > 0 {
            debug!("Evicted {} oldest identities from history", evicted);
        }
        next
    }
}

impl Default for SeenHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads and writes the seen history through the host's key-value storage.
pub struct HistoryStore<S> {
    storage: S,
    bound: usize,
}

impl<S: Storage> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_bound(storage, HISTORY_BOUND)
    }

    pub fn with_bound(storage: S, bound: usize) -> Self {
        Self { storage, bound }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn load(&self) -> Result<SeenHistory> {
        let raw = self
            .storage
            .get_item(SEEN_KEY)
            .await
            .map_err(WatcherError::Storage)?;

        let Some(raw) = raw else {
            info!("No seen history stored yet, starting empty");
            return Ok(SeenHistory::with_bound(self.bound));
        };

        let entries: Vec<String> = serde_json::from_str(&raw)?;
        let stored = entries.len();
        let history = SeenHistory::from_entries(entries, self.bound);
        if history.len() != stored {
            warn!(
                "Normalised stored history from {} to {} entries",
                stored,
                history.len()
            );
        }

        debug!("Loaded seen history with {} entries", history.len());
        Ok(history)
    }

    pub async fn persist(&self, history: &SeenHistory) -> Result<()> {
        let entries: Vec<&str> = history.iter().collect();
        let raw = serde_json::to_string(&entries)?;
        self.storage
            .set_item(SEEN_KEY, &raw)
            .await
            .map_err(WatcherError::Storage)?;

        debug!("Persisted seen history with {} entries", history.len());
        Ok(())
    }
}
