pub mod clipboard;
pub mod settings;

pub use clipboard::{CaptureClipboardItem, CopyItemError, CopyItemToClipboard, SearchHistoryStore};
pub use settings::{UpdateHistoryLimit, UpdateHistoryLimitError};
