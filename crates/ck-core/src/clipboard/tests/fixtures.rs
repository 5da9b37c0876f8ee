//! Test fixtures and helper functions for clipboard tests.

use crate::clipboard::*;
use crate::ids::ItemId;

/// Text item with a deterministic id and timestamp.
pub fn text_item(id: &str, text: &str, created_at_ms: i64) -> ClipboardItem {
    ClipboardItem::new(
        ItemId::from(id),
        ItemContent::Text(text.to_string()),
        TimestampMs::from_epoch_millis(created_at_ms),
    )
}

/// Image item carrying a tiny fake PNG payload.
pub fn image_item(id: &str, created_at_ms: i64) -> ClipboardItem {
    ClipboardItem::new(
        ItemId::from(id),
        ItemContent::Image(bytes::Bytes::from_static(b"\x89PNG\r\n\x1a\n")),
        TimestampMs::from_epoch_millis(created_at_ms),
    )
}

pub fn pinned(mut item: ClipboardItem) -> ClipboardItem {
    item.set_pinned(true);
    item
}

pub fn ids(items: &[ClipboardItem]) -> Vec<&str> {
    items.iter().map(|item| item.id().as_str()).collect()
}
