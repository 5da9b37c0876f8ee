//! Pasteboard change counters.
//!
//! macOS exposes `NSPasteboard.changeCount`. Other platforms have no such
//! counter, so one is synthesized from a digest of the current contents.

use std::sync::Mutex;

use anyhow::{anyhow, Result};
use clipboard_rs::Clipboard;

#[cfg(target_os = "macos")]
pub(crate) fn native_change_count() -> Result<i64> {
    use objc::runtime::{Class, Object};
    use objc::{msg_send, sel, sel_impl};

    let class = Class::get("NSPasteboard").ok_or_else(|| anyhow!("NSPasteboard unavailable"))?;
    // SAFETY: `generalPasteboard` and `changeCount` are plain AppKit getters
    // with no preconditions.
    unsafe {
        let pasteboard: *mut Object = msg_send![class, generalPasteboard];
        if pasteboard.is_null() {
            return Err(anyhow!("general pasteboard unavailable"));
        }
        let count: isize = msg_send![pasteboard, changeCount];
        Ok(count as i64)
    }
}

/// Counter that advances whenever the digest of the pasteboard contents changes.
#[derive(Debug, Default)]
pub struct FingerprintCounter {
    state: Mutex<FingerprintState>,
}

#[derive(Debug, Default)]
struct FingerprintState {
    last: Option<blake3::Hash>,
    count: i64,
}

impl FingerprintCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a digest of the current contents and returns the counter.
    pub fn advance(&self, digest: blake3::Hash) -> i64 {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if state.last != Some(digest) {
            state.last = Some(digest);
            state.count += 1;
        }
        state.count
    }

    pub fn sample(&self, ctx: &clipboard_rs::ClipboardContext) -> Result<i64> {
        Ok(self.advance(contents_digest(ctx)?))
    }
}

fn contents_digest(ctx: &clipboard_rs::ClipboardContext) -> Result<blake3::Hash> {
    let mut formats = ctx.available_formats().map_err(|e| anyhow!(e))?;
    formats.sort();

    let mut hasher = blake3::Hasher::new();
    for format in &formats {
        hasher.update(format.as_bytes());
        hasher.update(&[0]);
        if let Ok(buf) = ctx.get_buffer(format) {
            hasher.update(&(buf.len() as u64).to_le_bytes());
            hasher.update(&buf);
        }
    }
    Ok(hasher.finalize())
}
