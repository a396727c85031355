//! Signature pad pipeline
//!
//! [`SignaturePad`] connects:
//! - Input sampling (pointer/touch events from the host)
//! - The pen state machine (Idle / Drawing)
//! - Segment rasterization onto the [`PixelSurface`]
//! - The draw-activity flag consulted by presence detection
//!
//! The pad does not depend on any UI toolkit; hosts feed it events and blit
//! [`PixelSurface::as_bytes`] wherever they display the canvas.

mod stroke;
mod surface_ops;

use std::cell::Cell;

use crate::surface::PixelSurface;
use crate::types::{DrawingPoint, StrokeStyle};

pub use stroke::StrokeOutcome;

/// Pen state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenState {
    /// No pen on the surface
    Idle,
    /// Pen down; `last` is where the next segment starts
    Drawing { last: DrawingPoint },
}

/// The signature canvas: surface, pen state and draw-activity flag.
///
/// Invariant: `has_drawn` implies at least one non-transparent pixel. The
/// flag is only set after a segment actually lands on the surface, and is
/// cleared together with the surface.
pub struct SignaturePad {
    /// Pixel surface shown on the canvas
    pub(crate) surface: PixelSurface,
    /// Pen appearance
    pub(crate) style: StrokeStyle,
    /// Current pen state
    pub(crate) state: PenState,
    /// Draw-activity flag
    pub(crate) has_drawn: bool,
    /// Memoized fallback scan: (surface revision, result)
    pub(crate) scan_cache: Cell<Option<(u64, bool)>>,
}

impl SignaturePad {
    /// Create a pad with an unsized surface; call [`resize`] once the
    /// canvas has been laid out
    ///
    /// [`resize`]: SignaturePad::resize
    pub fn new(style: StrokeStyle) -> Self {
        Self {
            surface: PixelSurface::new(0, 0),
            style,
            state: PenState::Idle,
            has_drawn: false,
            scan_cache: Cell::new(None),
        }
    }

    /// Get the pixel surface
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Get the pen state
    pub fn state(&self) -> PenState {
        self.state
    }

    /// Check if a stroke is currently in progress
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, PenState::Drawing { .. })
    }

    /// Draw-activity flag: true once any segment has been painted since the
    /// last clear
    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::scan_for_ink;
    use readsign_ipc::{CanvasRect, PointerInput};

    fn pad() -> SignaturePad {
        let mut pad = SignaturePad::new(StrokeStyle::new(2.5, [0x1f, 0x29, 0x37, 255]));
        pad.resize(300.0, 150.0, 1.0);
        pad
    }

    fn rect() -> CanvasRect {
        CanvasRect::new(0.0, 0.0, 300.0, 150.0)
    }

    #[test]
    fn test_pad_creation() {
        let pad = pad();
        assert_eq!(pad.surface().width, 300);
        assert_eq!(pad.surface().height, 150);
        assert_eq!(pad.state(), PenState::Idle);
        assert!(!pad.has_drawn());
    }

    #[test]
    fn test_pad_stroke() {
        let mut pad = pad();

        pad.pen_down(&PointerInput::mouse(10.0, 10.0), &rect());
        assert!(pad.is_drawing());
        assert!(!pad.has_drawn(), "pen-down alone paints nothing");

        let outcome = pad.pen_move(&PointerInput::mouse(50.0, 40.0), &rect());
        assert!(matches!(outcome, StrokeOutcome::Painted { .. }));
        assert!(pad.has_drawn());

        assert!(pad.pen_up());
        assert!(!pad.is_drawing());
        assert!(pad.has_signature());
    }

    #[test]
    fn test_move_while_idle_ignored() {
        let mut pad = pad();
        let outcome = pad.pen_move(&PointerInput::mouse(50.0, 40.0), &rect());
        assert_eq!(outcome, StrokeOutcome::Ignored);
        assert!(!pad.has_drawn());
        assert!(!pad.pen_up());
    }

    #[test]
    fn test_pad_clear() {
        let mut pad = pad();
        pad.pen_down(&PointerInput::mouse(10.0, 10.0), &rect());
        pad.pen_move(&PointerInput::mouse(60.0, 10.0), &rect());
        pad.pen_up();

        pad.clear();
        assert!(!pad.has_drawn());
        assert!(!pad.has_signature());
        assert_eq!(pad.state(), PenState::Idle);
    }

    #[test]
    fn test_any_move_sequence_leaves_signature() {
        let paths: &[&[(f32, f32)]] = &[
            &[(5.0, 5.0)],
            &[(100.0, 75.0), (100.0, 75.0)],
            &[(0.0, 0.0), (299.0, 149.0), (10.0, 140.0)],
        ];
        for path in paths {
            let mut pad = pad();
            pad.pen_down(&PointerInput::mouse(20.0, 20.0), &rect());
            for &(x, y) in path.iter() {
                pad.pen_move(&PointerInput::mouse(x, y), &rect());
            }
            pad.pen_up();
            assert!(pad.has_signature(), "path {:?}", path);
        }
    }

    #[test]
    fn test_drawn_flag_implies_ink_at_edges() {
        // Start and end points on, just inside and well outside each edge
        let xs = [-40.0, -1.0, 0.0, 0.5, 150.0, 299.5, 300.0, 301.0, 340.0];
        let ys = [-40.0, -1.0, 0.0, 75.0, 149.5, 150.0, 190.0];
        let mut drawn = 0;
        for ratio in [1.0, 1.5, 2.0, 3.0] {
            for &x in &xs {
                for &y in &ys {
                    let mut pad = SignaturePad::new(StrokeStyle::new(2.5, [0x1f, 0x29, 0x37, 255]));
                    pad.resize(300.0, 150.0, ratio);
                    pad.pen_down(&PointerInput::mouse(x, y), &rect());
                    pad.pen_move(&PointerInput::mouse(300.0 - x, 150.0 - y), &rect());
                    pad.pen_move(&PointerInput::mouse(x, 150.0 - y), &rect());
                    pad.pen_up();

                    if pad.has_drawn() {
                        drawn += 1;
                        assert!(
                            scan_for_ink(pad.surface()),
                            "flag set without ink: ratio={ratio} from=({x}, {y})"
                        );
                    }
                }
            }
        }
        assert!(drawn > 0);
    }

    #[test]
    fn test_resize_erases_drawing() {
        let mut pad = pad();
        pad.pen_down(&PointerInput::mouse(10.0, 10.0), &rect());
        pad.pen_move(&PointerInput::mouse(60.0, 10.0), &rect());

        pad.resize(400.0, 200.0, 2.0);
        assert_eq!(pad.surface().width, 800);
        assert_eq!(pad.surface().scale(), 2.0);
        assert!(!pad.has_drawn());
        assert!(!pad.is_drawing());
        assert!(!pad.has_signature());
    }
}
