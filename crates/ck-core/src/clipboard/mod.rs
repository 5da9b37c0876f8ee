//! Clipboard domain models.
mod change;
mod content;
mod item;
mod limit;
mod ordering;
mod search;
mod timestamp;

pub use change::{ChangeCount, ObservedChangeCount};
pub use content::{ItemContent, ItemKind, PasteboardContent, IMAGE_PREVIEW, PREVIEW_MAX_CHARS};
pub use item::ClipboardItem;
pub use limit::{
    evict_over_limit, HistoryLimit, DEFAULT_MAX_HISTORY_COUNT, UNLIMITED_HISTORY_THRESHOLD,
};
pub use ordering::{history_order, is_history_ordered, sort_history, unpinned_insert_index};
pub use search::{filter_items, highlight_ranges, matches_keyword};
pub use timestamp::TimestampMs;

#[cfg(test)]
mod tests;
