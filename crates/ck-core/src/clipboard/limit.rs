use serde::{Deserialize, Serialize};

use super::ClipboardItem;

pub const DEFAULT_MAX_HISTORY_COUNT: i64 = 200;

/// Configured values at or above this threshold disable trimming.
pub const UNLIMITED_HISTORY_THRESHOLD: i64 = 10_000;

/// Capacity policy for the history collection. Pinned items never count
/// against the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryLimit {
    Bounded(usize),
    Unlimited,
}

impl HistoryLimit {
    /// Maps the user-facing `max_history_count` setting onto a policy.
    ///
    /// Non-positive values fall back to the default instead of being rejected.
    pub fn from_setting(value: i64) -> Self {
        if value >= UNLIMITED_HISTORY_THRESHOLD {
            HistoryLimit::Unlimited
        } else if value <= 0 {
            HistoryLimit::Bounded(DEFAULT_MAX_HISTORY_COUNT as usize)
        } else {
            HistoryLimit::Bounded(value as usize)
        }
    }

    /// How many unpinned items may remain given `pinned` pinned items.
    /// `None` means no bound.
    pub fn unpinned_allowance(&self, pinned: usize) -> Option<usize> {
        match self {
            HistoryLimit::Bounded(limit) => Some(limit.saturating_sub(pinned)),
            HistoryLimit::Unlimited => None,
        }
    }
}

impl Default for HistoryLimit {
    fn default() -> Self {
        HistoryLimit::Bounded(DEFAULT_MAX_HISTORY_COUNT as usize)
    }
}

/// Removes the unpinned items beyond the allowance and returns them.
///
/// `items` must already be in history order; the evicted items are the
/// oldest unpinned ones (the tail of the unpinned segment).
pub fn evict_over_limit(items: &mut Vec<ClipboardItem>, limit: HistoryLimit) -> Vec<ClipboardItem> {
    let pinned = items.iter().filter(|item| item.is_pinned()).count();
    let Some(allowance) = limit.unpinned_allowance(pinned) else {
        return Vec::new();
    };

    let mut kept_unpinned = 0usize;
    let mut evicted = Vec::new();
    items.retain(|item| {
        if item.is_pinned() {
            return true;
        }
        if kept_unpinned < allowance {
            kept_unpinned += 1;
            true
        } else {
            evicted.push(item.clone());
            false
        }
    });

    #[cfg(feature = "tracing")]
    if !evicted.is_empty() {
        tracing::debug!(evicted = evicted.len(), pinned, allowance, "history over limit");
    }

    evicted
}
