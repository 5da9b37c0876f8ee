use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Maximum number of characters kept in a text preview.
pub const PREVIEW_MAX_CHARS: usize = 80;

/// Placeholder preview shown for image items.
pub const IMAGE_PREVIEW: &str = "[Image]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Text,
    Image,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Image => "image",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ItemKind::Text),
            "image" => Ok(ItemKind::Image),
            other => Err(anyhow::anyhow!("unknown clipboard item kind: {other}")),
        }
    }
}

/// Payload of a history item. Exactly one payload exists per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemContent {
    Text(String),
    /// PNG-encoded raster bytes.
    Image(Bytes),
}

impl ItemContent {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemContent::Text(_) => ItemKind::Text,
            ItemContent::Image(_) => ItemKind::Image,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ItemContent::Text(text) => Some(text),
            ItemContent::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&Bytes> {
        match self {
            ItemContent::Image(bytes) => Some(bytes),
            ItemContent::Text(_) => None,
        }
    }

    pub fn size_bytes(&self) -> usize {
        match self {
            ItemContent::Text(text) => text.len(),
            ItemContent::Image(bytes) => bytes.len(),
        }
    }

    /// First [`PREVIEW_MAX_CHARS`] characters with line breaks turned into spaces,
    /// or [`IMAGE_PREVIEW`] for images.
    pub fn preview(&self) -> String {
        match self {
            ItemContent::Text(text) => text
                .chars()
                .take(PREVIEW_MAX_CHARS)
                .map(|c| if c == '\n' { ' ' } else { c })
                .collect(),
            ItemContent::Image(_) => IMAGE_PREVIEW.to_string(),
        }
    }
}

/// What the system pasteboard currently holds, already classified by priority
/// (image before text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteboardContent {
    /// PNG-normalized image bytes.
    Image(Bytes),
    Text(String),
    Empty,
}

impl PasteboardContent {
    pub fn is_empty(&self) -> bool {
        matches!(self, PasteboardContent::Empty)
    }
}
