use async_trait::async_trait;

use crate::clipboard::PasteboardContent;

/// Callback invoked by the clipboard poller when the pasteboard changed and
/// yielded a usable payload.
///
/// 剪贴板变化回调，由平台层的轮询器调用。
#[async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    async fn on_clipboard_changed(&self, content: PasteboardContent) -> anyhow::Result<()>;
}
