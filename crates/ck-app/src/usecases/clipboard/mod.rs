mod capture_clipboard_item;
mod copy_item_to_clipboard;
mod search_history_store;

pub use capture_clipboard_item::CaptureClipboardItem;
pub use copy_item_to_clipboard::{CopyItemError, CopyItemToClipboard};
pub use search_history_store::{SearchHistoryStore, COLD_SEARCH_LIMIT};
