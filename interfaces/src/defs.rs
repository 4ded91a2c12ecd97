use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One link carried by a notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationLink {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
}

/// The payload a host turns into a user-visible message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub content: String,
    pub links: Vec<NotificationLink>,
}

// Object style note:
// Implementations of these traits are scoped to a single watcher instance.
// A watcher borrows them for the duration of one tick and never assumes
// another tick runs concurrently against the same scope.

/// Key-value storage owned by the host platform.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Accepts notifications produced by a watcher tick.
#[async_trait]
pub trait NotificationHost: Send + Sync {
    async fn deliver(&self, payload: &NotificationPayload) -> Result<()>;
}

#[async_trait]
impl<T: Storage + ?Sized> Storage for std::sync::Arc<T> {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value).await
    }
}
