pub mod app_dirs;
pub mod clipboard;
pub mod runtime;

pub use app_dirs::AppDirs;
pub use clipboard::LocalClipboard;
pub use runtime::clipboard_poller::{ClipboardPoller, PollOutcome};
