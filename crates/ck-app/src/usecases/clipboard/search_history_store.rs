use std::sync::Arc;

use anyhow::Result;
use ck_core::ports::ClipboardHistoryStorePort;
use ck_core::ClipboardItem;
use tracing::instrument;

pub const COLD_SEARCH_LIMIT: usize = 100;

/// Searches the whole store, including items outside the loaded window.
pub struct SearchHistoryStore {
    store: Arc<dyn ClipboardHistoryStorePort>,
}

impl SearchHistoryStore {
    pub fn new(store: Arc<dyn ClipboardHistoryStorePort>) -> Self {
        Self { store }
    }

    #[instrument(name = "usecase.search_history_store.execute", skip(self))]
    pub async fn execute(&self, keyword: &str) -> Result<Vec<ClipboardItem>> {
        self.store.search_text(keyword, COLD_SEARCH_LIMIT).await
    }
}
