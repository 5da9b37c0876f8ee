use crate::db::schema::clipboard_items;
use diesel::prelude::*;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = clipboard_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ClipboardItemRow {
    pub id: String,
    pub kind: String,
    pub text_content: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub preview: String,
    pub created_at: i64,
    pub is_pinned: bool,
}

/// Full row written on upsert. `None` payload columns are written as NULL so a
/// re-put never leaves a stale payload behind.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = clipboard_items)]
#[diesel(treat_none_as_null = true)]
pub struct NewClipboardItemRow {
    pub id: String,
    pub kind: String,
    pub text_content: Option<String>,
    pub image_data: Option<Vec<u8>>,
    pub preview: String,
    pub created_at: i64,
    pub is_pinned: bool,
}
