//! CPU pixel surface for the signature canvas - RGBA8 storage

use std::borrow::Cow;

use thiserror::Error;
use tracing::debug;

use crate::constants::{MAX_SURFACE_DIM, MIN_DEVICE_PIXEL_RATIO};

/// Failure to read back rendered pixels (e.g. a restricted rendering context)
#[derive(Debug, Error)]
pub enum SurfaceReadError {
    #[error("Pixel data unavailable: {0}")]
    Unavailable(String),
}

/// Anything whose rendered pixels can be read back as RGBA bytes
pub trait PixelSource {
    /// Row-major RGBA8 bytes, four per pixel
    fn read_rgba(&self) -> Result<Cow<'_, [u8]>, SurfaceReadError>;
}

/// An RGBA8 surface with a uniform logical-to-device scale.
///
/// Pixels are straight (non-premultiplied) RGBA, matching what a 2D canvas
/// hands out from `getImageData`. Every mutation bumps [`revision`], which
/// lets readers memoize derived facts without going stale.
///
/// [`revision`]: PixelSurface::revision
pub struct PixelSurface {
    /// Surface dimensions in device pixels
    pub width: u32,
    pub height: u32,
    /// Device pixel ratio applied to logical coordinates
    scale: f32,
    /// Pixel data in row-major order
    pixels: Vec<[u8; 4]>,
    revision: u64,
}

impl PixelSurface {
    /// Create a surface with the given device dimensions and a unit transform,
    /// initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.min(MAX_SURFACE_DIM);
        let height = height.min(MAX_SURFACE_DIM);
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            scale: 1.0,
            pixels: vec![[0, 0, 0, 0]; pixel_count],
            revision: 0,
        }
    }

    /// Create a surface sized for a canvas of `logical_width` x `logical_height`
    /// CSS pixels at the given device pixel ratio
    pub fn with_transform(logical_width: f32, logical_height: f32, device_pixel_ratio: f32) -> Self {
        let mut surface = Self::new(0, 0);
        surface.reset_transform(logical_width, logical_height, device_pixel_ratio);
        surface
    }

    /// Reallocate for new canvas dimensions and reset the transform.
    ///
    /// This erases everything drawn so far; a resized canvas starts blank.
    pub fn reset_transform(&mut self, logical_width: f32, logical_height: f32, device_pixel_ratio: f32) {
        let dpr = sanitize_ratio(device_pixel_ratio);
        let width = device_extent(logical_width, dpr);
        let height = device_extent(logical_height, dpr);

        debug!(
            "PixelSurface::reset_transform: {:.1}x{:.1} css @ {:.2} -> {}x{} px",
            logical_width, logical_height, dpr, width, height
        );

        self.width = width;
        self.height = height;
        self.scale = dpr;
        self.pixels = vec![[0, 0, 0, 0]; (width as usize) * (height as usize)];
        self.bump();
    }

    /// Logical-to-device scale factor
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Monotonic mutation counter
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Clear the surface to transparent black
    pub fn clear(&mut self) {
        self.pixels.fill([0, 0, 0, 0]);
        self.bump();
    }

    /// Get a pixel at the given device coordinates
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Set a pixel at the given device coordinates
    /// Does nothing if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
            self.bump();
        }
    }

    /// Composite `color` over the existing pixel (source-over), with
    /// `coverage` (0-1) scaling the source alpha
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4], coverage: f32) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        let dst = self.pixels[index];

        let src_alpha = (color[3] as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        let dst_alpha = dst[3] as f32 / 255.0;
        let dst_weight = dst_alpha * (1.0 - src_alpha);
        let out_alpha = src_alpha + dst_weight;

        self.pixels[index] = if out_alpha <= 0.0 {
            [0, 0, 0, 0]
        } else {
            let channel = |c: usize| {
                let mixed = (color[c] as f32 * src_alpha + dst[c] as f32 * dst_weight) / out_alpha;
                mixed.round().clamp(0.0, 255.0) as u8
            };
            [
                channel(0),
                channel(1),
                channel(2),
                (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
            ]
        };
        self.bump();
    }

    /// Raw RGBA bytes, suitable for `ImageData` or PNG encoding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// True when the surface has no pixels at all (not yet laid out)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Direct access to pixel data
    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    #[inline]
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl PixelSource for PixelSurface {
    fn read_rgba(&self) -> Result<Cow<'_, [u8]>, SurfaceReadError> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

fn sanitize_ratio(device_pixel_ratio: f32) -> f32 {
    if device_pixel_ratio.is_finite() {
        device_pixel_ratio.max(MIN_DEVICE_PIXEL_RATIO)
    } else {
        MIN_DEVICE_PIXEL_RATIO
    }
}

fn device_extent(logical: f32, dpr: f32) -> u32 {
    if !logical.is_finite() || logical <= 0.0 {
        return 0;
    }
    ((logical * dpr).round() as u32).min(MAX_SURFACE_DIM)
}
