//! Shared fakes for the application-layer tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use ck_core::clipboard::sort_history;
use ck_core::ports::{ClipboardHistoryStorePort, ClockPort};
use ck_core::{ClipboardItem, HistoryLimit, ItemContent, ItemId, TimestampMs};
use ck_app::HistoryManager;

/// Store that keeps rows in a vector.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<Vec<ClipboardItem>>,
}

impl InMemoryStore {
    pub fn ids(&self) -> Vec<String> {
        let mut rows = self.rows.lock().unwrap().clone();
        sort_history(&mut rows);
        rows.iter().map(|item| item.id().to_string()).collect()
    }

    pub fn seed(&self, items: Vec<ClipboardItem>) {
        self.rows.lock().unwrap().extend(items);
    }

    pub fn pinned(&self, id: &str) -> Option<bool> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id().as_str() == id)
            .map(ClipboardItem::is_pinned)
    }
}

#[async_trait]
impl ClipboardHistoryStorePort for InMemoryStore {
    async fn put(&self, item: &ClipboardItem) -> Result<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|row| row.id() != item.id());
        rows.push(item.clone());
        Ok(())
    }

    async fn update_pin(&self, id: &ItemId, pinned: bool) -> Result<()> {
        if let Some(row) = self.rows.lock().unwrap().iter_mut().find(|row| row.id() == id) {
            row.set_pinned(pinned);
        }
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> Result<()> {
        self.rows.lock().unwrap().retain(|row| row.id() != id);
        Ok(())
    }

    async fn load_all(&self, limit: usize, offset: usize) -> Result<Vec<ClipboardItem>> {
        let mut rows = self.rows.lock().unwrap().clone();
        sort_history(&mut rows);
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn search_text(&self, keyword: &str, limit: usize) -> Result<Vec<ClipboardItem>> {
        let mut rows = self.rows.lock().unwrap().clone();
        sort_history(&mut rows);
        let needle = keyword.to_lowercase();
        Ok(rows
            .into_iter()
            .filter(|item| {
                item.text_content()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
            .take(limit)
            .collect())
    }

    async fn clear_unpinned(&self) -> Result<()> {
        self.rows.lock().unwrap().retain(ClipboardItem::is_pinned);
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.rows.lock().unwrap().clear();
        Ok(())
    }
}

/// Clock that advances one second per reading.
pub struct SteppingClock {
    next: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(ms: i64) -> Self {
        Self {
            next: AtomicI64::new(ms),
        }
    }
}

impl ClockPort for SteppingClock {
    fn now_ms(&self) -> i64 {
        self.next.fetch_add(1_000, Ordering::SeqCst)
    }
}

pub fn text_at(body: &str, ms: i64) -> ClipboardItem {
    ClipboardItem::new(
        ItemId::new(),
        ItemContent::Text(body.to_string()),
        TimestampMs::from_epoch_millis(ms),
    )
}

pub fn image_at(ms: i64) -> ClipboardItem {
    ClipboardItem::new(
        ItemId::new(),
        ItemContent::Image(vec![0x89, b'P', b'N', b'G'].into()),
        TimestampMs::from_epoch_millis(ms),
    )
}

pub fn manager(store: Arc<InMemoryStore>, limit: HistoryLimit) -> Arc<HistoryManager> {
    Arc::new(HistoryManager::new(
        store,
        limit,
        500,
        tokio::runtime::Handle::current(),
    ))
}

pub fn previews(items: &[ClipboardItem]) -> Vec<String> {
    items.iter().map(|item| item.preview().to_string()).collect()
}

/// Routes log output to the test harness; `RUST_LOG` selects the level.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
