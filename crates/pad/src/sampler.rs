//! Pointer sampling
//!
//! Turns a raw mouse or touch event into a [`DrawingPoint`] relative to the
//! canvas. Touch events prefer an active contact, then the contact that just
//! ended, and finally fall back to the event's own client coordinates.

use readsign_ipc::{CanvasRect, PointerInput};

use crate::types::DrawingPoint;

/// Sample a pointer event against the canvas' current bounding rect
pub fn sample_point(input: &PointerInput, rect: &CanvasRect) -> DrawingPoint {
    let (client_x, client_y) = input
        .touches
        .first()
        .or_else(|| input.changed_touches.first())
        .map(|touch| (touch.client_x, touch.client_y))
        .unwrap_or((input.client_x, input.client_y));

    DrawingPoint::new(client_x - rect.left, client_y - rect.top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use readsign_ipc::TouchPoint;

    fn rect() -> CanvasRect {
        CanvasRect::new(10.0, 20.0, 300.0, 150.0)
    }

    #[test]
    fn test_mouse_point() {
        let point = sample_point(&PointerInput::mouse(110.0, 70.0), &rect());
        assert_eq!(point, DrawingPoint::new(100.0, 50.0));
    }

    #[test]
    fn test_active_touch_preferred() {
        let input = PointerInput::touch(
            vec![TouchPoint {
                client_x: 15.0,
                client_y: 25.0,
            }],
            vec![TouchPoint {
                client_x: 99.0,
                client_y: 99.0,
            }],
        );
        assert_eq!(sample_point(&input, &rect()), DrawingPoint::new(5.0, 5.0));
    }

    #[test]
    fn test_changed_touch_on_touchend() {
        let input = PointerInput::touch(
            Vec::new(),
            vec![TouchPoint {
                client_x: 40.0,
                client_y: 60.0,
            }],
        );
        assert_eq!(sample_point(&input, &rect()), DrawingPoint::new(30.0, 40.0));
    }

    #[test]
    fn test_empty_touch_lists_fall_back_to_client() {
        let mut input = PointerInput::touch(Vec::new(), Vec::new());
        input.client_x = 12.0;
        input.client_y = 22.0;
        assert_eq!(sample_point(&input, &rect()), DrawingPoint::new(2.0, 2.0));
    }
}
