//! Image normalization. Everything stored in history is PNG.

use std::io::Cursor;

use anyhow::{Context, Result};
use image::ImageFormat;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(PNG_SIGNATURE)
}

/// Decodes a TIFF payload and re-encodes it as PNG.
pub fn tiff_to_png(tiff: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory_with_format(tiff, ImageFormat::Tiff)
        .context("decode TIFF clipboard image failed")?;

    let mut png = Cursor::new(Vec::new());
    decoded
        .write_to(&mut png, ImageFormat::Png)
        .context("encode PNG failed")?;
    Ok(png.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = RgbaImage::from_pixel(2, 3, Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, format)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn converts_tiff_to_png() {
        let tiff = encode(ImageFormat::Tiff);
        assert!(!is_png(&tiff));

        let png = tiff_to_png(&tiff).unwrap();

        assert!(is_png(&png));
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 3));
    }

    #[test]
    fn rejects_garbage() {
        assert!(tiff_to_png(b"not an image").is_err());
    }

    #[test]
    fn detects_png_signature() {
        assert!(is_png(&encode(ImageFormat::Png)));
        assert!(!is_png(b""));
    }
}
