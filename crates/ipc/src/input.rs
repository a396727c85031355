//! Pointer input types for mouse and touch.

use serde::{Deserialize, Serialize};

/// A single touch contact in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// A pointer event as delivered by the host, before sampling.
///
/// Mouse events only carry `client_x`/`client_y`. Touch events also carry
/// the currently active contacts and the contacts that changed in this
/// event (for `touchend` the lifted finger only appears in the latter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub client_x: f32,
    pub client_y: f32,
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
    #[serde(default)]
    pub changed_touches: Vec<TouchPoint>,
}

impl PointerInput {
    pub fn mouse(client_x: f32, client_y: f32) -> Self {
        Self {
            client_x,
            client_y,
            ..Default::default()
        }
    }

    pub fn touch(touches: Vec<TouchPoint>, changed_touches: Vec<TouchPoint>) -> Self {
        Self {
            client_x: 0.0,
            client_y: 0.0,
            touches,
            changed_touches,
        }
    }
}

/// Bounding rectangle of the canvas element in viewport (CSS) pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}
