use serde::{Deserialize, Serialize};

/// A sampled pen position in canvas-local logical (CSS) pixels.
///
/// The surface transform scales these by the device pixel ratio when
/// rasterizing, so callers never deal with physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawingPoint {
    pub x: f32,
    pub y: f32,
}

impl DrawingPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pen appearance. Caps and joins are always round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Line width in logical pixels
    pub width: f32,
    /// Straight (non-premultiplied) RGBA
    pub color: [u8; 4],
}

impl StrokeStyle {
    pub fn new(width: f32, color: [u8; 4]) -> Self {
        Self {
            width: width.max(0.0),
            color,
        }
    }
}
