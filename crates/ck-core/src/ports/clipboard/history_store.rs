use async_trait::async_trait;

use crate::clipboard::ClipboardItem;
use crate::ids::ItemId;

/// Durable storage for clipboard history.
///
/// Reads return items in history order: pinned first, then newest first.
/// Every write is idempotent so a repeated write-behind task is harmless.
#[async_trait]
pub trait ClipboardHistoryStorePort: Send + Sync {
    /// Inserts the item, or overwrites every column of an existing row with the same id.
    async fn put(&self, item: &ClipboardItem) -> anyhow::Result<()>;

    /// Updates only the pin flag. Unknown ids are ignored.
    async fn update_pin(&self, id: &ItemId, pinned: bool) -> anyhow::Result<()>;

    /// Removes the item. Unknown ids are ignored.
    async fn delete(&self, id: &ItemId) -> anyhow::Result<()>;

    async fn load_all(&self, limit: usize, offset: usize) -> anyhow::Result<Vec<ClipboardItem>>;

    /// Text items whose content contains `keyword`, case-insensitively.
    async fn search_text(&self, keyword: &str, limit: usize) -> anyhow::Result<Vec<ClipboardItem>>;

    async fn clear_unpinned(&self) -> anyhow::Result<()>;

    async fn clear_all(&self) -> anyhow::Result<()>;
}
