use std::sync::Arc;

use ck_core::{ChangeCount, ItemId};
use tracing::{info, instrument};

use crate::clipboard::ClipboardWriter;
use crate::history::HistoryManager;

#[derive(Debug, thiserror::Error)]
pub enum CopyItemError {
    #[error("clipboard item not found: {0}")]
    NotFound(ItemId),
    #[error("write to clipboard failed: {0}")]
    Write(#[source] anyhow::Error),
}

/// Copy a history item back to the system clipboard
pub struct CopyItemToClipboard {
    history: Arc<HistoryManager>,
    writer: Arc<ClipboardWriter>,
}

impl CopyItemToClipboard {
    pub fn new(history: Arc<HistoryManager>, writer: Arc<ClipboardWriter>) -> Self {
        Self { history, writer }
    }

    #[instrument(name = "usecase.copy_item_to_clipboard.execute", skip(self), fields(id = %id))]
    pub async fn execute(&self, id: &ItemId) -> Result<ChangeCount, CopyItemError> {
        let item = self
            .history
            .get(id)
            .ok_or_else(|| CopyItemError::NotFound(id.clone()))?;

        let count = self
            .writer
            .publish(&item)
            .await
            .map_err(CopyItemError::Write)?;

        info!(kind = %item.kind(), "history item copied to clipboard");
        Ok(count)
    }
}
