//! Signature export as a PNG data URI

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::constants::{EMPTY_DATA_URL, PNG_DATA_URL_PREFIX};
use crate::pipeline::SignaturePad;
use crate::surface::PixelSurface;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encode the surface as PNG bytes
pub fn encode_png(surface: &PixelSurface) -> Result<Vec<u8>, ExportError> {
    let (width, height) = (surface.width, surface.height);
    let image = RgbaImage::from_raw(width, height, surface.as_bytes().to_vec())
        .ok_or(ExportError::BufferSize { width, height })?;

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}

/// Encode the surface as `data:image/png;base64,...`.
///
/// A zero-sized surface yields `data:,`, as a browser canvas does.
pub fn to_data_url(surface: &PixelSurface) -> Result<String, ExportError> {
    if surface.is_empty() {
        return Ok(EMPTY_DATA_URL.to_string());
    }
    let png = encode_png(surface)?;
    Ok(format!("{}{}", PNG_DATA_URL_PREFIX, B64.encode(png)))
}

impl SignaturePad {
    /// Rasterized signature as a PNG data URI
    pub fn to_data_url(&self) -> Result<String, ExportError> {
        to_data_url(&self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_decodes_to_same_pixels() {
        let mut surface = PixelSurface::new(3, 2);
        surface.set_pixel(1, 1, [10, 20, 30, 255]);

        let url = to_data_url(&surface).unwrap();
        let payload = url.strip_prefix(PNG_DATA_URL_PREFIX).unwrap();
        let png = B64.decode(payload).unwrap();
        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png)
            .unwrap()
            .to_rgba8();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [10, 20, 30, 255]);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_surface_data_url() {
        let surface = PixelSurface::new(0, 0);
        assert_eq!(to_data_url(&surface).unwrap(), EMPTY_DATA_URL);
    }
}
