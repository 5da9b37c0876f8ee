use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use ck_core::ports::ClipboardHistoryStorePort;
use ck_core::{ClipboardItem, ItemId};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::task::TaskTracker;
use tracing::{debug, warn, Instrument};

/// A store write derived from an in-memory mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceOp {
    Put(ClipboardItem),
    UpdatePin { id: ItemId, pinned: bool },
    Delete(ItemId),
    ClearUnpinned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceOpKind {
    Put,
    UpdatePin,
    Delete,
    ClearUnpinned,
}

impl PersistenceOp {
    pub fn kind(&self) -> PersistenceOpKind {
        match self {
            PersistenceOp::Put(_) => PersistenceOpKind::Put,
            PersistenceOp::UpdatePin { .. } => PersistenceOpKind::UpdatePin,
            PersistenceOp::Delete(_) => PersistenceOpKind::Delete,
            PersistenceOp::ClearUnpinned => PersistenceOpKind::ClearUnpinned,
        }
    }

    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            PersistenceOp::Put(item) => Some(item.id()),
            PersistenceOp::UpdatePin { id, .. } | PersistenceOp::Delete(id) => Some(id),
            PersistenceOp::ClearUnpinned => None,
        }
    }
}

impl fmt::Display for PersistenceOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PersistenceOpKind::Put => "put",
            PersistenceOpKind::UpdatePin => "update_pin",
            PersistenceOpKind::Delete => "delete",
            PersistenceOpKind::ClearUnpinned => "clear_unpinned",
        })
    }
}

/// Report of one finished store write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceOutcome {
    pub kind: PersistenceOpKind,
    pub item_id: Option<ItemId>,
    /// Error message when the write failed.
    pub error: Option<String>,
}

impl PersistenceOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Fire-and-forget store writes.
///
/// Each batch runs as its own tracked task, but a batch waits for the
/// previous one to finish first, so the store sees writes in the order the
/// mutations happened. Batches are numbered; `flush` waits until the batch
/// that was last when it was called has finished.
pub(crate) struct WriteBehind {
    store: Arc<dyn ClipboardHistoryStorePort>,
    runtime: Handle,
    tracker: TaskTracker,
    outcomes: Option<mpsc::UnboundedSender<PersistenceOutcome>>,
    chain: Mutex<Chain>,
    completed: Arc<watch::Sender<u64>>,
}

#[derive(Default)]
struct Chain {
    tail: Option<oneshot::Receiver<()>>,
    scheduled: u64,
}

/// Marks a batch finished when dropped, including when its task panics or
/// is cancelled, so the chain and `flush` never wait forever.
struct BatchDone {
    seq: u64,
    completed: Arc<watch::Sender<u64>>,
    next: Option<oneshot::Sender<()>>,
}

impl Drop for BatchDone {
    fn drop(&mut self) {
        let seq = self.seq;
        self.completed.send_modify(|done| *done = (*done).max(seq));
        if let Some(next) = self.next.take() {
            let _ = next.send(());
        }
    }
}

impl WriteBehind {
    pub(crate) fn new(
        store: Arc<dyn ClipboardHistoryStorePort>,
        runtime: Handle,
        outcomes: Option<mpsc::UnboundedSender<PersistenceOutcome>>,
    ) -> Self {
        let (completed, _) = watch::channel(0);
        Self {
            store,
            runtime,
            tracker: TaskTracker::new(),
            outcomes,
            chain: Mutex::new(Chain::default()),
            completed: Arc::new(completed),
        }
    }

    pub(crate) fn schedule(&self, ops: Vec<PersistenceOp>) {
        if ops.is_empty() {
            return;
        }

        let (done_tx, done_rx) = oneshot::channel();
        let (previous, seq) = {
            let mut chain = self.chain.lock().unwrap_or_else(PoisonError::into_inner);
            chain.scheduled += 1;
            (chain.tail.replace(done_rx), chain.scheduled)
        };
        let done = BatchDone {
            seq,
            completed: Arc::clone(&self.completed),
            next: Some(done_tx),
        };

        let store = Arc::clone(&self.store);
        let outcomes = self.outcomes.clone();
        let span = tracing::debug_span!("history.write_behind", batch = seq, ops = ops.len());
        self.tracker.spawn_on(
            async move {
                let _done = done;
                if let Some(previous) = previous {
                    // An Err only means the previous batch task is gone.
                    let _ = previous.await;
                }
                for op in ops {
                    let outcome = apply(store.as_ref(), op).await;
                    if let Some(tx) = &outcomes {
                        let _ = tx.send(outcome);
                    }
                }
            }
            .instrument(span),
            &self.runtime,
        );
    }

    /// Waits until every write scheduled so far has finished. Safe to call
    /// from several tasks at once and while new writes are being scheduled.
    pub(crate) async fn flush(&self) {
        let target = self
            .chain
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .scheduled;
        let mut completed = self.completed.subscribe();
        // The sender lives in `self`, so the wait cannot fail.
        let _ = completed.wait_for(|done| *done >= target).await;
    }

    pub(crate) fn pending(&self) -> usize {
        self.tracker.len()
    }
}

async fn apply(store: &dyn ClipboardHistoryStorePort, op: PersistenceOp) -> PersistenceOutcome {
    let kind = op.kind();
    let item_id = op.item_id().cloned();
    let result = match &op {
        PersistenceOp::Put(item) => store.put(item).await,
        PersistenceOp::UpdatePin { id, pinned } => store.update_pin(id, *pinned).await,
        PersistenceOp::Delete(id) => store.delete(id).await,
        PersistenceOp::ClearUnpinned => store.clear_unpinned().await,
    };

    match result {
        Ok(()) => {
            debug!(op = %kind, id = ?item_id, "history write applied");
            PersistenceOutcome {
                kind,
                item_id,
                error: None,
            }
        }
        Err(err) => {
            warn!(op = %kind, id = ?item_id, error = %err, "history write failed; memory stays authoritative");
            PersistenceOutcome {
                kind,
                item_id,
                error: Some(format!("{err:#}")),
            }
        }
    }
}
