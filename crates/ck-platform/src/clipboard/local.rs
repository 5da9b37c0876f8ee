use super::common::CommonClipboardImpl;
use anyhow::Result;
use ck_core::ports::SystemClipboardPort;
use ck_core::{ChangeCount, PasteboardContent};
use clipboard_rs::ClipboardContext;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, debug_span};

#[cfg(not(target_os = "macos"))]
use super::change_count::FingerprintCounter;

/// System clipboard backed by clipboard-rs.
pub struct LocalClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
    #[cfg(not(target_os = "macos"))]
    counter: FingerprintCounter,
}

impl LocalClipboard {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow::anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
            #[cfg(not(target_os = "macos"))]
            counter: FingerprintCounter::new(),
        })
    }

    fn context(&self) -> MutexGuard<'_, ClipboardContext> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    #[cfg(target_os = "macos")]
    fn current_count(&self, _ctx: &ClipboardContext) -> Result<ChangeCount> {
        Ok(ChangeCount::new(super::change_count::native_change_count()?))
    }

    #[cfg(not(target_os = "macos"))]
    fn current_count(&self, ctx: &ClipboardContext) -> Result<ChangeCount> {
        Ok(ChangeCount::new(self.counter.sample(ctx)?))
    }
}

impl SystemClipboardPort for LocalClipboard {
    fn change_count(&self) -> Result<ChangeCount> {
        let ctx = self.context();
        self.current_count(&ctx)
    }

    fn read_content(&self) -> Result<PasteboardContent> {
        let span = debug_span!("platform.clipboard.read");
        span.in_scope(|| {
            let mut ctx = self.context();
            let content = CommonClipboardImpl::read_content(&mut ctx)?;
            debug!(
                kind = match &content {
                    PasteboardContent::Image(_) => "image",
                    PasteboardContent::Text(_) => "text",
                    PasteboardContent::Empty => "empty",
                },
                "Read system clipboard"
            );
            Ok(content)
        })
    }

    fn write_text(&self, text: &str) -> Result<ChangeCount> {
        let span = debug_span!("platform.clipboard.write_text", len = text.len());
        span.in_scope(|| {
            let mut ctx = self.context();
            CommonClipboardImpl::write_text(&mut ctx, text)?;
            self.current_count(&ctx)
        })
    }

    fn write_image(&self, png: &[u8]) -> Result<ChangeCount> {
        let span = debug_span!("platform.clipboard.write_image", size_bytes = png.len());
        span.in_scope(|| {
            let mut ctx = self.context();
            CommonClipboardImpl::write_image(&mut ctx, png)?;
            self.current_count(&ctx)
        })
    }
}
