use anyhow::{anyhow, Result};
use bytes::Bytes;
use clipboard_rs::{common::RustImage, Clipboard, ContentFormat, RustImageData};
use ck_core::PasteboardContent;
use tracing::{debug, warn};

use super::image::{is_png, tiff_to_png};

/// Pasteboard type identifiers for raw image data (macOS UTIs).
pub(crate) const PNG_FORMAT: &str = "public.png";
pub(crate) const TIFF_FORMAT: &str = "public.tiff";

pub struct CommonClipboardImpl;

fn map_clipboard_err<T>(
    result: std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>,
) -> Result<T> {
    result.map_err(|e| anyhow!(e))
}

impl CommonClipboardImpl {
    /// Reads the highest-priority payload: PNG, TIFF converted to PNG, any
    /// other image the backend can render as PNG, then plain text.
    pub fn read_content(ctx: &mut clipboard_rs::ClipboardContext) -> Result<PasteboardContent> {
        if let Some(png) = Self::read_image(ctx) {
            return Ok(PasteboardContent::Image(Bytes::from(png)));
        }

        if ctx.has(ContentFormat::Text) {
            let text = map_clipboard_err(ctx.get_text())?;
            if !text.is_empty() {
                return Ok(PasteboardContent::Text(text));
            }
        }

        Ok(PasteboardContent::Empty)
    }

    fn read_image(ctx: &mut clipboard_rs::ClipboardContext) -> Option<Vec<u8>> {
        if ctx.has(ContentFormat::Other(PNG_FORMAT.to_string())) {
            match ctx.get_buffer(PNG_FORMAT) {
                Ok(buf) if is_png(&buf) => return Some(buf),
                Ok(_) => debug!("png pasteboard entry without PNG signature"),
                Err(err) => warn!(error = %err, "reading PNG from pasteboard failed"),
            }
        }

        if ctx.has(ContentFormat::Other(TIFF_FORMAT.to_string())) {
            let png = map_clipboard_err(ctx.get_buffer(TIFF_FORMAT)).and_then(|tiff| tiff_to_png(&tiff));
            match png {
                Ok(png) => return Some(png),
                Err(err) => warn!(error = %err, "reading TIFF from pasteboard failed"),
            }
        }

        if ctx.has(ContentFormat::Image) {
            let png = map_clipboard_err(ctx.get_image())
                .and_then(|img| map_clipboard_err(img.to_png()))
                .map(|buf| buf.get_bytes().to_vec());
            match png {
                Ok(png) => return Some(png),
                Err(err) => warn!(error = %err, "reading image from pasteboard failed"),
            }
        }

        None
    }

    pub fn write_text(ctx: &mut clipboard_rs::ClipboardContext, text: &str) -> Result<()> {
        map_clipboard_err(ctx.clear())?;
        map_clipboard_err(ctx.set_text(text.to_string()))
    }

    pub fn write_image(ctx: &mut clipboard_rs::ClipboardContext, png: &[u8]) -> Result<()> {
        let img = RustImageData::from_bytes(png).map_err(|e| anyhow!(e))?;
        map_clipboard_err(ctx.clear())?;
        map_clipboard_err(ctx.set_image(img))
    }
}
