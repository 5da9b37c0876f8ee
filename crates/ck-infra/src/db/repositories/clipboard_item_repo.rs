use crate::db::models::{ClipboardItemRow, NewClipboardItemRow};
use crate::db::ports::{DbExecutor, InsertMapper, RowMapper};
use crate::db::schema::clipboard_items;
use anyhow::{Context, Result};
use ck_core::ports::ClipboardHistoryStorePort;
use ck_core::{ClipboardItem, ItemId, ItemKind};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, warn};

pub struct DieselClipboardHistoryRepository<E, IM, RM> {
    executor: E,
    insert_mapper: IM,
    row_mapper: RM,
}

impl<E, IM, RM> DieselClipboardHistoryRepository<E, IM, RM> {
    pub fn new(executor: E, insert_mapper: IM, row_mapper: RM) -> Self {
        Self {
            executor,
            insert_mapper,
            row_mapper,
        }
    }
}

impl<E, IM, RM> DieselClipboardHistoryRepository<E, IM, RM>
where
    RM: RowMapper<ClipboardItemRow, ClipboardItem>,
{
    /// Rows that fail to map are skipped so one corrupt row cannot hide the rest of the history.
    fn map_rows(&self, rows: Vec<ClipboardItemRow>) -> Vec<ClipboardItem> {
        rows.iter()
            .filter_map(|row| match self.row_mapper.to_domain(row) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(id = %row.id, error = %err, "skipping unreadable clipboard row");
                    None
                }
            })
            .collect()
    }
}

/// Escapes LIKE wildcards so the keyword matches literally.
fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl<E, IM, RM> DieselClipboardHistoryRepository<E, IM, RM>
where
    E: DbExecutor + Clone + 'static,
{
    /// Runs `f` on a pooled connection from the blocking thread pool, so a
    /// busy database never stalls the async workers.
    async fn run_blocking<T>(
        &self,
        f: impl FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    ) -> Result<T>
    where
        T: Send + 'static,
    {
        let executor = self.executor.clone();
        tokio::task::spawn_blocking(move || executor.run(f))
            .await
            .context("database task panicked")?
    }
}

#[async_trait::async_trait]
impl<E, IM, RM> ClipboardHistoryStorePort for DieselClipboardHistoryRepository<E, IM, RM>
where
    E: DbExecutor + Clone + 'static,
    IM: InsertMapper<ClipboardItem, NewClipboardItemRow>,
    RM: RowMapper<ClipboardItemRow, ClipboardItem>,
{
    async fn put(&self, item: &ClipboardItem) -> Result<()> {
        let row = self.insert_mapper.to_row(item)?;
        self.run_blocking(move |conn| {
            diesel::insert_into(clipboard_items::table)
                .values(&row)
                .on_conflict(clipboard_items::id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            Ok(())
        })
        .await?;
        debug!(id = %item.id(), kind = %item.kind(), "clipboard item stored");
        Ok(())
    }

    async fn update_pin(&self, id: &ItemId, pinned: bool) -> Result<()> {
        let id = id.clone();
        self.run_blocking(move |conn| {
            let updated = diesel::update(clipboard_items::table.find(id.as_str()))
                .set(clipboard_items::is_pinned.eq(pinned))
                .execute(conn)?;
            if updated == 0 {
                debug!(%id, "pin update matched no row");
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: &ItemId) -> Result<()> {
        let id = id.clone();
        self.run_blocking(move |conn| {
            diesel::delete(clipboard_items::table.find(id.as_str())).execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn load_all(&self, limit: usize, offset: usize) -> Result<Vec<ClipboardItem>> {
        let rows = self
            .run_blocking(move |conn| {
                let rows = clipboard_items::table
                    .select(ClipboardItemRow::as_select())
                    .order((
                        clipboard_items::is_pinned.desc(),
                        clipboard_items::created_at.desc(),
                    ))
                    .limit(limit as i64)
                    .offset(offset as i64)
                    .load::<ClipboardItemRow>(conn)?;
                Ok(rows)
            })
            .await?;
        Ok(self.map_rows(rows))
    }

    async fn search_text(&self, keyword: &str, limit: usize) -> Result<Vec<ClipboardItem>> {
        let pattern = like_pattern(keyword);
        let rows = self
            .run_blocking(move |conn| {
                let rows = clipboard_items::table
                    .select(ClipboardItemRow::as_select())
                    .filter(clipboard_items::kind.eq(ItemKind::Text.as_str()))
                    .filter(clipboard_items::text_content.like(pattern.as_str()).escape('\\'))
                    .order((
                        clipboard_items::is_pinned.desc(),
                        clipboard_items::created_at.desc(),
                    ))
                    .limit(limit as i64)
                    .load::<ClipboardItemRow>(conn)?;
                Ok(rows)
            })
            .await?;
        Ok(self.map_rows(rows))
    }

    async fn clear_unpinned(&self) -> Result<()> {
        self.run_blocking(|conn| {
            let removed =
                diesel::delete(clipboard_items::table.filter(clipboard_items::is_pinned.eq(false)))
                    .execute(conn)?;
            debug!(removed, "unpinned clipboard items cleared");
            Ok(())
        })
        .await
    }

    async fn clear_all(&self) -> Result<()> {
        self.run_blocking(|conn| {
            diesel::delete(clipboard_items::table).execute(conn)?;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
