use ck_core::clipboard::{
    evict_over_limit, filter_items, is_history_ordered, sort_history, unpinned_insert_index,
};
use std::collections::HashSet;

use ck_core::{ClipboardItem, HistoryLimit, ItemId};

use super::view::HistoryView;
use super::write_behind::PersistenceOp;

/// Result of offering a new item to the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The item was added. `evicted` lists unpinned items dropped by the
    /// capacity policy, which can include the new item itself when pinned
    /// items already fill the limit.
    Inserted { id: ItemId, evicted: Vec<ItemId> },
    /// Same text as the current head, or an id already present.
    Duplicate,
}

/// The history collection plus its derived filter and selection.
///
/// Methods keep the collection in history order and return the store writes
/// the caller has to schedule.
#[derive(Debug, Default)]
pub(crate) struct HistoryState {
    items: Vec<ClipboardItem>,
    filtered: Vec<ClipboardItem>,
    keyword: String,
    selected: Option<ItemId>,
    limit: HistoryLimit,
    load: Option<LoadInFlight>,
}

/// Removals made while a store read is in flight. The read may predate them,
/// so the rows it returns for these ids are stale.
#[derive(Debug, Default)]
struct LoadInFlight {
    readers: usize,
    removed: HashSet<ItemId>,
    cleared_unpinned: bool,
}

impl HistoryState {
    pub(crate) fn new(limit: HistoryLimit) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub(crate) fn items(&self) -> &[ClipboardItem] {
        &self.items
    }

    pub(crate) fn limit(&self) -> HistoryLimit {
        self.limit
    }

    pub(crate) fn get(&self, id: &ItemId) -> Option<&ClipboardItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    fn is_head_duplicate(&self, item: &ClipboardItem) -> bool {
        match (self.items.first(), item.text_content()) {
            (Some(head), Some(text)) => head.has_text(text),
            _ => false,
        }
    }

    pub(crate) fn ingest(&mut self, item: ClipboardItem) -> (IngestOutcome, Vec<PersistenceOp>) {
        if self.is_head_duplicate(&item) || self.position(item.id()).is_some() {
            return (IngestOutcome::Duplicate, Vec::new());
        }

        let id = item.id().clone();
        let index = if item.is_pinned() {
            0
        } else {
            unpinned_insert_index(&self.items)
        };
        self.items.insert(index, item);
        if !is_history_ordered(&self.items) {
            sort_history(&mut self.items);
        }

        let evicted = evict_over_limit(&mut self.items, self.limit);
        let mut ops = Vec::with_capacity(evicted.len() + 1);
        let new_item_kept = self.get(&id).cloned();
        if let Some(kept) = new_item_kept {
            ops.push(PersistenceOp::Put(kept));
        }
        ops.extend(
            evicted
                .iter()
                .filter(|gone| gone.id() != &id)
                .map(|gone| PersistenceOp::Delete(gone.id().clone())),
        );

        self.refilter();
        let evicted: Vec<ItemId> = evicted.into_iter().map(|gone| gone.id().clone()).collect();
        self.note_removed(evicted.iter().cloned());
        (IngestOutcome::Inserted { id, evicted }, ops)
    }

    /// Flips the pin flag. `None` when the id is unknown.
    pub(crate) fn toggle_pin(&mut self, id: &ItemId) -> Option<(bool, Vec<PersistenceOp>)> {
        let index = self.position(id)?;
        let pinned = self.items[index].toggle_pin();
        sort_history(&mut self.items);
        self.refilter();
        Some((
            pinned,
            vec![PersistenceOp::UpdatePin {
                id: id.clone(),
                pinned,
            }],
        ))
    }

    pub(crate) fn delete(&mut self, id: &ItemId) -> Option<Vec<PersistenceOp>> {
        let index = self.position(id)?;
        self.items.remove(index);
        self.refilter();
        self.note_removed([id.clone()]);
        Some(vec![PersistenceOp::Delete(id.clone())])
    }

    /// Removes every unpinned item.
    pub(crate) fn clear_all(&mut self) -> (usize, Vec<PersistenceOp>) {
        let before = self.items.len();
        self.items.retain(ClipboardItem::is_pinned);
        self.refilter();
        if let Some(load) = self.load.as_mut() {
            load.cleared_unpinned = true;
        }
        (before - self.items.len(), vec![PersistenceOp::ClearUnpinned])
    }

    pub(crate) fn trim_to_limit(&mut self, limit: HistoryLimit) -> Vec<PersistenceOp> {
        self.limit = limit;
        let evicted = evict_over_limit(&mut self.items, limit);
        self.refilter();
        self.note_removed(evicted.iter().map(|gone| gone.id().clone()));
        evicted
            .into_iter()
            .map(|gone| PersistenceOp::Delete(gone.id().clone()))
            .collect()
    }

    fn note_removed(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        if let Some(load) = self.load.as_mut() {
            load.removed.extend(ids);
        }
    }

    /// Starts tracking removals for a store read about to begin.
    pub(crate) fn begin_load(&mut self) {
        self.load.get_or_insert_with(LoadInFlight::default).readers += 1;
    }

    /// Stops tracking for one reader without installing anything.
    pub(crate) fn abort_load(&mut self) {
        self.finish_load();
    }

    fn finish_load(&mut self) -> LoadInFlight {
        let mut load = self.load.take().unwrap_or_default();
        load.readers = load.readers.saturating_sub(1);
        if load.readers > 0 {
            // Later readers may still return the same stale rows.
            let snapshot = LoadInFlight {
                readers: 0,
                removed: load.removed.clone(),
                cleared_unpinned: load.cleared_unpinned,
            };
            self.load = Some(load);
            return snapshot;
        }
        load
    }

    /// Installs items read from the store. Items already in memory that the
    /// store did not return are kept, so captures made while loading survive.
    /// Rows for items removed since [`HistoryState::begin_load`] are dropped.
    pub(crate) fn replace_items(&mut self, loaded: Vec<ClipboardItem>) {
        let stale = self.finish_load();
        // In-memory items are newer than their stored rows.
        let mut merged: Vec<ClipboardItem> = self.items.drain(..).collect();
        for item in loaded {
            if stale.removed.contains(item.id()) || (stale.cleared_unpinned && !item.is_pinned()) {
                continue;
            }
            if !merged.iter().any(|existing| existing.id() == item.id()) {
                merged.push(item);
            }
        }
        sort_history(&mut merged);
        self.items = merged;
        self.refilter();
        if self.selected.is_none() {
            self.selected = self.filtered.first().map(|item| item.id().clone());
        }
    }

    pub(crate) fn set_keyword(&mut self, keyword: String) {
        self.keyword = keyword;
        self.refilter();
    }

    /// Selects a visible item. Returns false when `id` is not in the filtered view.
    pub(crate) fn select(&mut self, id: &ItemId) -> bool {
        if self.filtered.iter().any(|item| item.id() == id) {
            self.selected = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub(crate) fn select_next(&mut self) {
        let next = match self.selected_index() {
            Some(index) => self.filtered.get(index + 1),
            None => self.filtered.first(),
        };
        if let Some(item) = next {
            self.selected = Some(item.id().clone());
        }
    }

    pub(crate) fn select_previous(&mut self) {
        let previous = match self.selected_index() {
            Some(index) if index > 0 => self.filtered.get(index - 1),
            Some(_) | None => None,
        };
        if let Some(item) = previous {
            self.selected = Some(item.id().clone());
        }
    }

    fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        self.filtered.iter().position(|item| item.id() == selected)
    }

    /// Recomputes the filtered view. A selection that is no longer visible
    /// falls back to the first visible item.
    fn refilter(&mut self) {
        self.filtered = filter_items(&self.items, &self.keyword);
        if self.selected.is_some() && self.selected_index().is_none() {
            self.selected = self.filtered.first().map(|item| item.id().clone());
        }
    }

    pub(crate) fn view(&self) -> HistoryView {
        HistoryView {
            items: self.items.clone(),
            filtered: self.filtered.clone(),
            selected: self.selected.clone(),
            keyword: self.keyword.clone(),
            total_count: self.items.len(),
        }
    }
}
