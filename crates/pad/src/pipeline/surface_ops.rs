//! Surface operations for the signature pad

use tracing::info;

use super::{PenState, SignaturePad};

impl SignaturePad {
    /// Erase the signature and reset the draw-activity flag
    pub fn clear(&mut self) {
        self.surface.clear();
        self.has_drawn = false;
        self.state = PenState::Idle;
    }

    /// Re-fit the surface to the canvas' CSS size and device pixel ratio.
    ///
    /// Known limitation: the surface is reallocated, so whatever was drawn
    /// (including a stroke in progress) is lost. Hosts should debounce resize
    /// events so a drag-resize only resets once.
    pub fn resize(&mut self, css_width: f32, css_height: f32, device_pixel_ratio: f32) {
        self.surface
            .reset_transform(css_width, css_height, device_pixel_ratio);
        self.has_drawn = false;
        self.state = PenState::Idle;
        info!(
            "Signature surface resized to {}x{} px",
            self.surface.width, self.surface.height
        );
    }
}
