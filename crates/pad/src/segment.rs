//! Line segment rasterization for pen strokes

use tracing::debug;

use crate::surface::PixelSurface;
use crate::types::{DrawingPoint, StrokeStyle};

impl PixelSurface {
    /// Paint a round-capped segment from `from` to `to` (logical coordinates).
    ///
    /// Coverage is the distance from each pixel centre to the segment, with a
    /// one-pixel ramp at the edge for anti-aliasing. Consecutive segments share
    /// an endpoint, so their round caps form round joins.
    ///
    /// Returns the bounding box (x, y, width, height) of pixels that received
    /// paint, or None if nothing landed on the surface.
    pub fn stroke_segment(
        &mut self,
        from: DrawingPoint,
        to: DrawingPoint,
        style: &StrokeStyle,
    ) -> Option<(u32, u32, u32, u32)> {
        let scale = self.scale();
        let radius = style.width * scale / 2.0;
        if radius <= 0.0 || style.color[3] == 0 || self.is_empty() {
            return None;
        }

        let (ax, ay) = (from.x * scale, from.y * scale);
        let (bx, by) = (to.x * scale, to.y * scale);
        if !(ax.is_finite() && ay.is_finite() && bx.is_finite() && by.is_finite()) {
            debug!("stroke_segment: non-finite endpoint, skipped");
            return None;
        }

        // Half a pixel of ramp beyond the radius
        let reach = radius + 0.5;
        let x_min = clamp_floor(ax.min(bx) - reach, self.width);
        let y_min = clamp_floor(ay.min(by) - reach, self.height);
        let x_max = clamp_ceil(ax.max(bx) + reach, self.width);
        let y_max = clamp_ceil(ay.max(by) + reach, self.height);
        if x_min >= x_max || y_min >= y_max {
            return None;
        }

        let (dx, dy) = (bx - ax, by - ay);
        let length_sq = dx * dx + dy * dy;

        let mut painted: Option<(u32, u32, u32, u32)> = None;
        for py in y_min..y_max {
            for px in x_min..x_max {
                let cx = px as f32 + 0.5;
                let cy = py as f32 + 0.5;

                // Project the pixel centre onto the segment
                let t = if length_sq > 0.0 {
                    (((cx - ax) * dx + (cy - ay) * dy) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let nx = ax + t * dx - cx;
                let ny = ay + t * dy - cy;
                let distance = (nx * nx + ny * ny).sqrt();

                let coverage = (reach - distance).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }

                self.blend_pixel(px, py, style.color, coverage);
                if self.get_pixel(px, py).is_some_and(|p| p[3] > 0) {
                    painted = Some(match painted {
                        None => (px, py, px, py),
                        Some((x0, y0, x1, y1)) => (x0.min(px), y0.min(py), x1.max(px), y1.max(py)),
                    });
                }
            }
        }

        let bounds = painted.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1));
        debug!(
            "stroke_segment: ({:.1}, {:.1}) -> ({:.1}, {:.1}), radius={:.2}px, painted={:?}",
            ax, ay, bx, by, radius, bounds
        );
        bounds
    }
}

fn clamp_floor(value: f32, limit: u32) -> u32 {
    (value.floor().max(0.0) as u32).min(limit)
}

fn clamp_ceil(value: f32, limit: u32) -> u32 {
    (value.ceil().max(0.0) as u32).min(limit)
}
