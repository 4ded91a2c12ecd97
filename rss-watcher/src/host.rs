use crate::types::{NotificationHost, NotificationPayload};
use anyhow::Context;
use async_trait::async_trait;
use tokio::io::{AsyncWriteExt, Stdout};
use tokio::sync::Mutex;
use tracing::debug;

/// Writes every notification as one JSON line on stdout.
pub struct StdoutHost {
    out: Mutex<Stdout>,
}

impl StdoutHost {
    pub fn new() -> Self {
        Self {
            out: Mutex::new(tokio::io::stdout()),
        }
    }
}

impl Default for StdoutHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationHost for StdoutHost {
    async fn deliver(&self, payload: &NotificationPayload) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(payload).context("serialize notification")?;
        line.push(b'\n');

        let mut out = self.out.lock().await;
        out.write_all(&line).await.context("write notification")?;
        out.flush().await?;

        debug!("Delivered notification with {} link(s)", payload.links.len());
        Ok(())
    }
}
