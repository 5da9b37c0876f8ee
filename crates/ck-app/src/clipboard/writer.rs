use std::sync::Arc;

use anyhow::{Context, Result};
use ck_core::ports::SystemClipboardPort;
use ck_core::{ChangeCount, ClipboardItem, ItemContent, ObservedChangeCount};
use tracing::{debug, instrument};

/// Writes history items back to the system pasteboard.
///
/// The change counter produced by the write is recorded as already observed,
/// so the poller does not capture the item a second time.
pub struct ClipboardWriter {
    clipboard: Arc<dyn SystemClipboardPort>,
    observed: Arc<ObservedChangeCount>,
}

impl ClipboardWriter {
    pub fn new(clipboard: Arc<dyn SystemClipboardPort>, observed: Arc<ObservedChangeCount>) -> Self {
        Self {
            clipboard,
            observed,
        }
    }

    #[instrument(name = "clipboard.writer.publish", skip(self, item), fields(id = %item.id(), kind = %item.kind()))]
    pub async fn publish(&self, item: &ClipboardItem) -> Result<ChangeCount> {
        let clipboard = Arc::clone(&self.clipboard);
        let observed = Arc::clone(&self.observed);
        let content = item.content().clone();
        let count = tokio::task::spawn_blocking(move || {
            observed.record_write(|| match &content {
                ItemContent::Text(text) => clipboard.write_text(text),
                ItemContent::Image(png) => clipboard.write_image(png),
            })
        })
        .await
        .context("clipboard write task panicked")??;

        debug!(change_count = count.value(), "item written to clipboard");
        Ok(count)
    }
}
