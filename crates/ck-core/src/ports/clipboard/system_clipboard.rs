use crate::clipboard::{ChangeCount, PasteboardContent};

/// Access to the OS pasteboard.
///
/// Calls are blocking; async callers should run them on a blocking thread.
pub trait SystemClipboardPort: Send + Sync {
    /// Current change counter. Cheap; sampled on every poll tick.
    fn change_count(&self) -> anyhow::Result<ChangeCount>;

    /// Reads the highest-priority payload: PNG image, then TIFF converted to
    /// PNG, then plain text.
    fn read_content(&self) -> anyhow::Result<PasteboardContent>;

    /// Clears the pasteboard, writes `text` and returns the resulting counter.
    fn write_text(&self, text: &str) -> anyhow::Result<ChangeCount>;

    /// Clears the pasteboard, writes the PNG and returns the resulting counter.
    fn write_image(&self, png: &[u8]) -> anyhow::Result<ChangeCount>;
}
