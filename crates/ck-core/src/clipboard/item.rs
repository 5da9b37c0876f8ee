use bytes::Bytes;
use std::hash::{Hash, Hasher};

use super::{ItemContent, ItemKind, TimestampMs};
use crate::ids::ItemId;

/// One entry of the clipboard history.
///
/// Identity is the [`ItemId`] alone: two items carrying the same text but
/// different ids are distinct entries. The preview is derived once when the
/// item is created and travels with it from then on.
#[derive(Debug, Clone)]
pub struct ClipboardItem {
    id: ItemId,
    content: ItemContent,
    preview: String,
    created_at: TimestampMs,
    is_pinned: bool,
}

impl ClipboardItem {
    pub fn new(id: ItemId, content: ItemContent, created_at: TimestampMs) -> Self {
        let preview = content.preview();
        Self {
            id,
            content,
            preview,
            created_at,
            is_pinned: false,
        }
    }

    pub fn text(text: impl Into<String>, created_at: TimestampMs) -> Self {
        Self::new(ItemId::new(), ItemContent::Text(text.into()), created_at)
    }

    pub fn image(png: impl Into<Bytes>, created_at: TimestampMs) -> Self {
        Self::new(ItemId::new(), ItemContent::Image(png.into()), created_at)
    }

    /// Rebuilds an item from storage, keeping the stored preview as-is.
    pub fn restore(
        id: ItemId,
        content: ItemContent,
        preview: String,
        created_at: TimestampMs,
        is_pinned: bool,
    ) -> Self {
        Self {
            id,
            content,
            preview,
            created_at,
            is_pinned,
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn kind(&self) -> ItemKind {
        self.content.kind()
    }

    pub fn content(&self) -> &ItemContent {
        &self.content
    }

    pub fn text_content(&self) -> Option<&str> {
        self.content.as_text()
    }

    pub fn image_bytes(&self) -> Option<&Bytes> {
        self.content.as_image()
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn created_at(&self) -> TimestampMs {
        self.created_at
    }

    pub fn is_pinned(&self) -> bool {
        self.is_pinned
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.is_pinned = pinned;
    }

    /// Flips the pin flag and returns the new value.
    pub fn toggle_pin(&mut self) -> bool {
        self.is_pinned = !self.is_pinned;
        self.is_pinned
    }

    /// True when this is a text item holding exactly `text`.
    pub fn has_text(&self, text: &str) -> bool {
        self.text_content() == Some(text)
    }

    pub fn relative_time(&self, now: TimestampMs) -> String {
        self.created_at.relative_to(now)
    }

    pub fn full_date_time(&self) -> String {
        self.created_at.full_date_time()
    }
}

impl PartialEq for ClipboardItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ClipboardItem {}

impl Hash for ClipboardItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
