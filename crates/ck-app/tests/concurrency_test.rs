//! Interleavings between the poller, the writer, `load()` and write-behind.

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use ck_app::usecases::{CaptureClipboardItem, CopyItemToClipboard};
use ck_app::ClipboardWriter;
use ck_core::ports::{ClipboardHistoryStorePort, SystemClipboardPort};
use ck_core::{ChangeCount, ClipboardItem, HistoryLimit, ItemId, ObservedChangeCount, PasteboardContent};
use ck_platform::{ClipboardPoller, PollOutcome};
use common::*;
use tokio::sync::{oneshot, Notify};

/// Pasteboard whose writes take a while to return after the counter moved.
#[derive(Default)]
struct SlowPasteboard {
    state: Mutex<(i64, Option<PasteboardContent>)>,
}

impl SlowPasteboard {
    fn external_copy(&self, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.0 += 1;
        state.1 = Some(PasteboardContent::Text(text.to_string()));
    }
}

impl SystemClipboardPort for SlowPasteboard {
    fn change_count(&self) -> Result<ChangeCount> {
        Ok(ChangeCount::new(self.state.lock().unwrap().0))
    }

    fn read_content(&self) -> Result<PasteboardContent> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .1
            .clone()
            .unwrap_or(PasteboardContent::Empty))
    }

    fn write_text(&self, text: &str) -> Result<ChangeCount> {
        self.external_copy(text);
        let count = self.change_count()?;
        std::thread::sleep(Duration::from_millis(100));
        Ok(count)
    }

    fn write_image(&self, png: &[u8]) -> Result<ChangeCount> {
        {
            let mut state = self.state.lock().unwrap();
            state.0 += 1;
            state.1 = Some(PasteboardContent::Image(png.to_vec().into()));
        }
        let count = self.change_count()?;
        std::thread::sleep(Duration::from_millis(100));
        Ok(count)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tick_during_copy_does_not_capture_own_write() {
    init_test_tracing();
    let store = Arc::new(InMemoryStore::default());
    let history = manager(store, HistoryLimit::default());
    let older = text_at("older", 1_000);
    let older_id = older.id().clone();
    history.ingest(older);
    history.ingest(text_at("newer", 2_000));

    let pasteboard = Arc::new(SlowPasteboard::default());
    let observed = Arc::new(ObservedChangeCount::new(ChangeCount::new(0)));
    let writer = Arc::new(ClipboardWriter::new(pasteboard.clone(), observed.clone()));
    let copy = CopyItemToClipboard::new(history.clone(), writer);
    let capture = Arc::new(CaptureClipboardItem::new(
        history.clone(),
        Arc::new(SteppingClock::starting_at(10_000)),
    ));
    let poller = Arc::new(ClipboardPoller::new(
        pasteboard.clone(),
        observed.clone(),
        capture,
        Duration::from_millis(500),
    ));

    let tick = {
        let poller = poller.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            poller.poll_once().await
        })
    };
    copy.execute(&older_id).await.unwrap();

    assert_eq!(tick.await.unwrap(), PollOutcome::Unchanged);
    assert_eq!(previews(&history.items()), vec!["newer", "older"]);

    pasteboard.external_copy("from elsewhere");
    assert_eq!(poller.poll_once().await, PollOutcome::Delivered);
    assert_eq!(
        previews(&history.items()),
        vec!["from elsewhere", "newer", "older"]
    );
}

/// Store whose `load_all` can be held after it has taken its snapshot.
#[derive(Default)]
struct GatedStore {
    inner: InMemoryStore,
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    snapshot_taken: Notify,
}

impl GatedStore {
    fn hold_next_load(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.gate.lock().unwrap() = Some(rx);
        tx
    }
}

#[async_trait]
impl ClipboardHistoryStorePort for GatedStore {
    async fn put(&self, item: &ClipboardItem) -> Result<()> {
        self.inner.put(item).await
    }

    async fn update_pin(&self, id: &ItemId, pinned: bool) -> Result<()> {
        self.inner.update_pin(id, pinned).await
    }

    async fn delete(&self, id: &ItemId) -> Result<()> {
        self.inner.delete(id).await
    }

    async fn load_all(&self, limit: usize, offset: usize) -> Result<Vec<ClipboardItem>> {
        let snapshot = self.inner.load_all(limit, offset).await?;
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            self.snapshot_taken.notify_one();
            let _ = gate.await;
        }
        Ok(snapshot)
    }

    async fn search_text(&self, keyword: &str, limit: usize) -> Result<Vec<ClipboardItem>> {
        self.inner.search_text(keyword, limit).await
    }

    async fn clear_unpinned(&self) -> Result<()> {
        self.inner.clear_unpinned().await
    }

    async fn clear_all(&self) -> Result<()> {
        self.inner.clear_all().await
    }
}

fn gated_manager(store: Arc<GatedStore>, limit: HistoryLimit) -> Arc<ck_app::HistoryManager> {
    Arc::new(ck_app::HistoryManager::new(
        store,
        limit,
        500,
        tokio::runtime::Handle::current(),
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_removals_during_load_are_not_undone() {
    let store = Arc::new(GatedStore::default());
    let a = text_at("a", 1_000);
    let a_id = a.id().clone();
    store.inner.seed(vec![a]);
    let history = gated_manager(store.clone(), HistoryLimit::Bounded(1));
    history.load().await.unwrap();

    let release = store.hold_next_load();
    let loading = {
        let history = history.clone();
        tokio::spawn(async move { history.load().await })
    };
    store.snapshot_taken.notified().await;

    assert!(history.delete(&a_id));
    history.ingest(text_at("b", 2_000));
    let c = text_at("c", 3_000);
    let c_id = c.id().clone();
    history.ingest(c);
    release.send(()).unwrap();
    loading.await.unwrap().unwrap();

    assert_eq!(previews(&history.items()), vec!["c"]);
    history.flush().await;
    assert_eq!(store.inner.ids(), vec![c_id.to_string()]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_clear_during_first_load_drops_stored_unpinned_rows() {
    let store = Arc::new(GatedStore::default());
    store.inner.seed(vec![text_at("stored", 1_000)]);
    let history = gated_manager(store.clone(), HistoryLimit::default());

    let release = store.hold_next_load();
    let loading = {
        let history = history.clone();
        tokio::spawn(async move { history.load().await })
    };
    store.snapshot_taken.notified().await;

    history.clear_all();
    release.send(()).unwrap();
    loading.await.unwrap().unwrap();

    assert!(history.items().is_empty());
    history.flush().await;
    assert!(store.inner.ids().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_flush_while_ingesting_leaves_store_matching_memory() {
    let store = Arc::new(InMemoryStore::default());
    let history = manager(store.clone(), HistoryLimit::Bounded(25));

    let mut tasks = Vec::new();
    for task in 0..4i64 {
        let history = history.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..50i64 {
                history.ingest(text_at(&format!("t{task}-{i}"), 1 + i * 10 + task));
                if i % 10 == 0 {
                    tokio::task::yield_now().await;
                }
            }
        }));
    }
    let flusher = {
        let history = history.clone();
        tokio::spawn(async move {
            for _ in 0..20 {
                history.flush().await;
                tokio::task::yield_now().await;
            }
        })
    };

    for task in tasks {
        task.await.unwrap();
    }
    tokio::time::timeout(Duration::from_secs(10), async {
        flusher.await.unwrap();
        tokio::join!(history.flush(), history.flush());
    })
    .await
    .expect("flush did not return");

    let in_memory: Vec<String> = history
        .items()
        .iter()
        .map(|item| item.id().to_string())
        .collect();
    assert_eq!(in_memory.len(), 25);
    assert_eq!(store.ids(), in_memory);
}
