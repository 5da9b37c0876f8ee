use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use ck_core::ports::ClipboardHistoryStorePort;
use ck_core::{ClipboardItem, HistoryLimit, ItemId};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use super::state::{HistoryState, IngestOutcome};
use super::view::HistoryView;
use super::write_behind::{PersistenceOutcome, WriteBehind};

/// Owner of the clipboard history.
///
/// 剪贴板历史的唯一持有者：所有修改在同一把锁内同步完成，随后发布新的视图。
pub struct HistoryManager {
    state: Mutex<HistoryState>,
    view_tx: watch::Sender<HistoryView>,
    write_behind: WriteBehind,
    store: Arc<dyn ClipboardHistoryStorePort>,
    load_limit: usize,
}

impl HistoryManager {
    /// `runtime` runs the write-behind tasks, so mutations may be called from
    /// threads outside the runtime.
    pub fn new(
        store: Arc<dyn ClipboardHistoryStorePort>,
        limit: HistoryLimit,
        load_limit: usize,
        runtime: Handle,
    ) -> Self {
        Self::build(store, limit, load_limit, runtime, None)
    }

    /// Like [`HistoryManager::new`], additionally reporting every finished
    /// store write on the returned channel.
    pub fn with_outcome_sink(
        store: Arc<dyn ClipboardHistoryStorePort>,
        limit: HistoryLimit,
        load_limit: usize,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<PersistenceOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::build(store, limit, load_limit, runtime, Some(tx)), rx)
    }

    fn build(
        store: Arc<dyn ClipboardHistoryStorePort>,
        limit: HistoryLimit,
        load_limit: usize,
        runtime: Handle,
        outcomes: Option<mpsc::UnboundedSender<PersistenceOutcome>>,
    ) -> Self {
        let state = HistoryState::new(limit);
        let (view_tx, _) = watch::channel(state.view());
        Self {
            state: Mutex::new(state),
            view_tx,
            write_behind: WriteBehind::new(Arc::clone(&store), runtime, outcomes),
            store,
            load_limit,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &HistoryState) {
        self.view_tx.send_replace(state.view());
    }

    /// Adds a captured item at the head of the unpinned segment and applies
    /// the capacity policy.
    pub fn ingest(&self, item: ClipboardItem) -> IngestOutcome {
        let mut state = self.lock();
        let (outcome, ops) = state.ingest(item);
        match &outcome {
            IngestOutcome::Inserted { id, evicted } => {
                debug!(%id, evicted = evicted.len(), "history item added");
                self.write_behind.schedule(ops);
                self.publish(&state);
            }
            IngestOutcome::Duplicate => debug!("duplicate clipboard text ignored"),
        }
        outcome
    }

    /// Returns the new pin state, or `None` for an unknown id.
    pub fn toggle_pin(&self, id: &ItemId) -> Option<bool> {
        let mut state = self.lock();
        let (pinned, ops) = state.toggle_pin(id)?;
        debug!(%id, pinned, "history item pin toggled");
        self.write_behind.schedule(ops);
        self.publish(&state);
        Some(pinned)
    }

    /// Returns false for an unknown id.
    pub fn delete(&self, id: &ItemId) -> bool {
        let mut state = self.lock();
        let Some(ops) = state.delete(id) else {
            return false;
        };
        debug!(%id, "history item deleted");
        self.write_behind.schedule(ops);
        self.publish(&state);
        true
    }

    /// Removes every unpinned item and returns how many were removed.
    pub fn clear_all(&self) -> usize {
        let mut state = self.lock();
        let (removed, ops) = state.clear_all();
        info!(removed, "unpinned history cleared");
        self.write_behind.schedule(ops);
        self.publish(&state);
        removed
    }

    /// Applies a new capacity limit and returns how many items were evicted.
    pub fn trim_to_limit(&self, limit: HistoryLimit) -> usize {
        let mut state = self.lock();
        let ops = state.trim_to_limit(limit);
        let evicted = ops.len();
        info!(?limit, evicted, "history limit applied");
        self.write_behind.schedule(ops);
        self.publish(&state);
        evicted
    }

    /// Reads the newest items from the store and installs them. The store is
    /// read without holding the history lock; items removed in memory while
    /// the read is in flight stay removed.
    pub async fn load(&self) -> Result<usize> {
        let pending = PendingLoad::begin(self);
        // Writes scheduled before this point must be visible to the read.
        self.write_behind.flush().await;

        let loaded = self
            .store
            .load_all(self.load_limit, 0)
            .await
            .context("load clipboard history failed")?;
        let count = loaded.len();

        let mut state = self.lock();
        pending.complete();
        state.replace_items(loaded);
        info!(loaded = count, total = state.items().len(), "clipboard history loaded");
        self.publish(&state);
        Ok(count)
    }

    pub fn set_keyword(&self, keyword: impl Into<String>) {
        let mut state = self.lock();
        state.set_keyword(keyword.into());
        self.publish(&state);
    }

    pub fn select(&self, id: &ItemId) -> bool {
        let mut state = self.lock();
        let selected = state.select(id);
        if selected {
            self.publish(&state);
        }
        selected
    }

    pub fn select_next(&self) {
        let mut state = self.lock();
        state.select_next();
        self.publish(&state);
    }

    pub fn select_previous(&self) {
        let mut state = self.lock();
        state.select_previous();
        self.publish(&state);
    }

    pub fn subscribe(&self) -> watch::Receiver<HistoryView> {
        self.view_tx.subscribe()
    }

    pub fn view(&self) -> HistoryView {
        self.view_tx.borrow().clone()
    }

    pub fn items(&self) -> Vec<ClipboardItem> {
        self.lock().items().to_vec()
    }

    pub fn head(&self) -> Option<ClipboardItem> {
        self.lock().items().first().cloned()
    }

    pub fn get(&self, id: &ItemId) -> Option<ClipboardItem> {
        self.lock().get(id).cloned()
    }

    pub fn limit(&self) -> HistoryLimit {
        self.lock().limit()
    }

    /// Number of write-behind tasks still running.
    pub fn pending_writes(&self) -> usize {
        self.write_behind.pending()
    }

    /// Waits for every store write scheduled so far.
    pub async fn flush(&self) {
        self.write_behind.flush().await;
    }
}

/// Keeps removal tracking balanced when a load fails or is cancelled.
struct PendingLoad<'a> {
    manager: Option<&'a HistoryManager>,
}

impl<'a> PendingLoad<'a> {
    fn begin(manager: &'a HistoryManager) -> Self {
        manager.lock().begin_load();
        Self {
            manager: Some(manager),
        }
    }

    /// The caller installs the result itself.
    fn complete(mut self) {
        self.manager = None;
    }
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if let Some(manager) = self.manager.take() {
            manager.lock().abort_load();
        }
    }
}
