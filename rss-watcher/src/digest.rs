use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::{FeedItem, NotificationLink, NotificationPayload, PREVIEW_BOUND};

/// How a tick reports the relevant new items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// A single notification counting the new items, with a short preview.
    #[default]
    Digest,
    /// One notification per new item.
    Stream,
}

/// What a tick hands to the notification host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "payloads", rename_all = "lowercase")]
pub enum WatchOutput {
    Digest(NotificationPayload),
    Stream(Vec<NotificationPayload>),
}

impl WatchOutput {
    pub fn payloads(&self) -> &[NotificationPayload] {
        match self {
            WatchOutput::Digest(payload) => std::slice::from_ref(payload),
            WatchOutput::Stream(payloads) => payloads,
        }
    }

    pub fn len(&self) -> usize {
        self.payloads().len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads().is_empty()
    }
}

/// Shapes relevant new items into notifications.
#[derive(Debug, Clone)]
pub struct DigestFormatter {
    mode: OutputMode,
    preview_bound: usize,
}

impl DigestFormatter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            preview_bound: PREVIEW_BOUND,
        }
    }

    /// `None` when there is nothing to report.
    pub fn format(&self, items: &[FeedItem]) -> Option<WatchOutput> {
        if items.is_empty() {
            return None;
        }

        let output = match self.mode {
            OutputMode::Digest => WatchOutput::Digest(self.compose_digest(items)),
            OutputMode::Stream => WatchOutput::Stream(
                items.iter().filter_map(Self::compose_item).collect(),
            ),
        };

        info!(
            "Formatted {} notification(s) for {} new item(s)",
            output.len(),
            items.len()
        );
        Some(output)
    }

    fn compose_digest(&self, items: &[FeedItem]) -> NotificationPayload {
        let noun = if items.len() == 1 { "item" } else { "items" };
        let content = format!("Found {} new {}.", items.len(), noun);

        let links: Vec<NotificationLink> = items
            .iter()
            .filter_map(|item| {
                let url = item.display_url()?;
                Some(NotificationLink {
                    title: item.display_title().to_string(),
                    description: item.snippet(),
                    url: url.to_string(),
                })
            })
            .take(self.preview_bound)
            .collect();

        debug!("Digest preview carries {} link(s)", links.len());
        NotificationPayload { content, links }
    }

    fn compose_item(item: &FeedItem) -> Option<NotificationPayload> {
        let url = item.display_url()?;
        let title = item.display_title();

        let content = match item.body_text() {
            Some(body) => format!("{}\n\n{}", title, body),
            None => title.to_string(),
        };

        Some(NotificationPayload {
            content,
            links: vec![NotificationLink {
                title: title.to_string(),
                description: None,
                url: url.to_string(),
            }],
        })
    }
}
