use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use ck_core::ports::{ClipboardChangeHandler, ClockPort};
use ck_core::{ClipboardItem, ItemContent, ItemId, PasteboardContent};
use tracing::{debug, instrument};

use crate::history::{HistoryManager, IngestOutcome};

/// Turns a classified pasteboard payload into a history item.
///
/// 将剪贴板内容转换为历史条目并交给历史管理器。
pub struct CaptureClipboardItem {
    history: Arc<HistoryManager>,
    clock: Arc<dyn ClockPort>,
}

impl CaptureClipboardItem {
    pub fn new(history: Arc<HistoryManager>, clock: Arc<dyn ClockPort>) -> Self {
        Self { history, clock }
    }

    /// Returns `None` for an empty payload.
    #[instrument(name = "usecase.capture_clipboard_item.execute", skip_all)]
    pub fn execute(&self, content: PasteboardContent) -> Option<IngestOutcome> {
        let content = match content {
            PasteboardContent::Image(png) => ItemContent::Image(png),
            PasteboardContent::Text(text) if !text.is_empty() => ItemContent::Text(text),
            PasteboardContent::Text(_) | PasteboardContent::Empty => return None,
        };

        let item = ClipboardItem::new(ItemId::new(), content, self.clock.now());
        let outcome = self.history.ingest(item);
        debug!(?outcome, "clipboard content captured");
        Some(outcome)
    }
}

#[async_trait]
impl ClipboardChangeHandler for CaptureClipboardItem {
    async fn on_clipboard_changed(&self, content: PasteboardContent) -> Result<()> {
        self.execute(content);
        Ok(())
    }
}
