//! Pen handling for the signature pad

use readsign_ipc::{CanvasRect, PointerInput};
use tracing::debug;

use crate::sampler::sample_point;

use super::{PenState, SignaturePad};

/// Result of a pen-move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeOutcome {
    /// Pen was not down
    Ignored,
    /// Segment fell entirely outside the surface
    Missed,
    /// Segment painted; bounding box in device pixels
    Painted { x: u32, y: u32, width: u32, height: u32 },
}

impl SignaturePad {
    /// Pen touches the canvas. Starts a new path at the sampled point
    /// without painting.
    pub fn pen_down(&mut self, input: &PointerInput, rect: &CanvasRect) {
        let point = sample_point(input, rect);
        debug!("pen_down at ({:.1}, {:.1})", point.x, point.y);
        self.state = PenState::Drawing { last: point };
    }

    /// Pen moves. While drawing, paints a segment from the last point to the
    /// sampled point and continues the path from there.
    pub fn pen_move(&mut self, input: &PointerInput, rect: &CanvasRect) -> StrokeOutcome {
        let PenState::Drawing { last } = self.state else {
            return StrokeOutcome::Ignored;
        };

        let current = sample_point(input, rect);
        let style = self.style;
        let painted = self.surface.stroke_segment(last, current, &style);
        self.state = PenState::Drawing { last: current };

        match painted {
            Some((x, y, width, height)) => {
                if !self.has_drawn {
                    debug!("first segment painted, signature present");
                }
                self.has_drawn = true;
                StrokeOutcome::Painted {
                    x,
                    y,
                    width,
                    height,
                }
            }
            None => StrokeOutcome::Missed,
        }
    }

    /// Pen lifted, left the canvas or was cancelled.
    ///
    /// Returns whether a stroke was in progress.
    pub fn pen_up(&mut self) -> bool {
        let was_drawing = self.is_drawing();
        self.state = PenState::Idle;
        was_drawing
    }
}
