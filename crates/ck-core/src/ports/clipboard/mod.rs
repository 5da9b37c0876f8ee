mod history_store;
mod system_clipboard;

pub use history_store::ClipboardHistoryStorePort;
pub use system_clipboard::SystemClipboardPort;
