use ck_core::{ClipboardItem, ItemId};

/// Snapshot of the history as observers see it.
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    /// Full collection in history order.
    pub items: Vec<ClipboardItem>,
    /// Items matching `keyword`, same order.
    pub filtered: Vec<ClipboardItem>,
    pub selected: Option<ItemId>,
    pub keyword: String,
    /// Size of the full collection, for the "N records" label.
    pub total_count: usize,
}

impl HistoryView {
    pub fn selected_item(&self) -> Option<&ClipboardItem> {
        let selected = self.selected.as_ref()?;
        self.filtered.iter().find(|item| item.id() == selected)
    }
}
