//! Pin-aware history ordering.
//!
//! A precedes B iff A is pinned and B is not, or both share the same pin
//! state and A was created later.

use std::cmp::Ordering;

use super::ClipboardItem;

pub fn history_order(a: &ClipboardItem, b: &ClipboardItem) -> Ordering {
    b.is_pinned()
        .cmp(&a.is_pinned())
        .then_with(|| b.created_at().cmp(&a.created_at()))
}

/// Stable sort, so items with equal keys keep their relative position.
pub fn sort_history(items: &mut [ClipboardItem]) {
    items.sort_by(history_order);
}

pub fn is_history_ordered(items: &[ClipboardItem]) -> bool {
    items
        .windows(2)
        .all(|pair| history_order(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Index of the first unpinned item, i.e. the head of the unpinned segment.
/// Equals `items.len()` when every item is pinned.
pub fn unpinned_insert_index(items: &[ClipboardItem]) -> usize {
    items
        .iter()
        .position(|item| !item.is_pinned())
        .unwrap_or(items.len())
}
