use anyhow::{anyhow, Result};
use bytes::Bytes;
use ck_core::{ClipboardItem, ItemContent, ItemId, ItemKind, TimestampMs};

use crate::db::models::{ClipboardItemRow, NewClipboardItemRow};
use crate::db::ports::{InsertMapper, RowMapper};

pub struct ClipboardItemRowMapper;

impl InsertMapper<ClipboardItem, NewClipboardItemRow> for ClipboardItemRowMapper {
    fn to_row(&self, domain: &ClipboardItem) -> Result<NewClipboardItemRow> {
        let (text_content, image_data) = match domain.content() {
            ItemContent::Text(text) => (Some(text.clone()), None),
            ItemContent::Image(png) => (None, Some(png.to_vec())),
        };

        Ok(NewClipboardItemRow {
            id: domain.id().to_string(),
            kind: domain.kind().as_str().to_string(),
            text_content,
            image_data,
            preview: domain.preview().to_string(),
            created_at: domain.created_at().as_millis(),
            is_pinned: domain.is_pinned(),
        })
    }
}

impl RowMapper<ClipboardItemRow, ClipboardItem> for ClipboardItemRowMapper {
    fn to_domain(&self, row: &ClipboardItemRow) -> Result<ClipboardItem> {
        let kind: ItemKind = row.kind.parse()?;
        let content = match kind {
            ItemKind::Text => ItemContent::Text(
                row.text_content
                    .clone()
                    .ok_or_else(|| anyhow!("text item {} has no text_content", row.id))?,
            ),
            ItemKind::Image => ItemContent::Image(Bytes::from(
                row.image_data
                    .clone()
                    .ok_or_else(|| anyhow!("image item {} has no image_data", row.id))?,
            )),
        };

        Ok(ClipboardItem::restore(
            ItemId::from(row.id.clone()),
            content,
            row.preview.clone(),
            TimestampMs::from_epoch_millis(row.created_at),
            row.is_pinned,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: &str, text: Option<&str>, image: Option<Vec<u8>>) -> ClipboardItemRow {
        ClipboardItemRow {
            id: "row-1".to_string(),
            kind: kind.to_string(),
            text_content: text.map(str::to_string),
            image_data: image,
            preview: "stored".to_string(),
            created_at: 42,
            is_pinned: true,
        }
    }

    #[test]
    fn text_row_maps_back_with_stored_preview() {
        let item = ClipboardItemRowMapper
            .to_domain(&row("text", Some("hello"), None))
            .unwrap();
        assert_eq!(item.text_content(), Some("hello"));
        assert_eq!(item.preview(), "stored");
        assert_eq!(item.created_at().as_millis(), 42);
        assert!(item.is_pinned());
    }

    #[test]
    fn payload_missing_for_kind_is_rejected() {
        assert!(ClipboardItemRowMapper
            .to_domain(&row("text", None, Some(vec![1])))
            .is_err());
        assert!(ClipboardItemRowMapper
            .to_domain(&row("image", Some("x"), None))
            .is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(ClipboardItemRowMapper
            .to_domain(&row("rtf", Some("x"), None))
            .is_err());
    }

    #[test]
    fn image_item_writes_only_image_column() {
        let item = ClipboardItem::image(vec![9u8, 9], TimestampMs::from_epoch_millis(7));
        let new_row = ClipboardItemRowMapper.to_row(&item).unwrap();
        assert_eq!(new_row.kind, "image");
        assert!(new_row.text_content.is_none());
        assert_eq!(new_row.image_data, Some(vec![9, 9]));
        assert_eq!(new_row.preview, "[Image]");
    }
}
