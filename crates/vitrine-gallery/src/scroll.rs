//! Zoom and pan math for a single item.
//!
//! Mirrors a zooming scroll view: the item is laid out at its aspect-fit size
//! and scaled by `zoom_scale`; `content_offset` is the scroll position of the
//! scaled content inside the bounds.

use vitrine_geometry::{aspect_fill_scale, content_center, zoom_rect, Point, Rect, Size, Vector2};

pub const MINIMUM_ZOOM_SCALE: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub zoom_scale: f32,
    pub minimum_zoom_scale: f32,
    pub maximum_zoom_scale: f32,
    pub content_offset: Point,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            zoom_scale: MINIMUM_ZOOM_SCALE,
            minimum_zoom_scale: MINIMUM_ZOOM_SCALE,
            maximum_zoom_scale: MINIMUM_ZOOM_SCALE,
            content_offset: Point::ZERO,
        }
    }
}

impl ScrollState {
    /// The maximum never drops below the scale that fills the bounds, so a
    /// double tap can always reach it.
    pub fn new(bounds: Size, fitted: Size, configured_maximum: f32) -> Self {
        Self {
            maximum_zoom_scale: maximum_zoom_scale(bounds, fitted, configured_maximum),
            ..Self::default()
        }
    }

    pub fn is_at_minimum(&self) -> bool {
        self.zoom_scale <= self.minimum_zoom_scale
    }

    pub fn content_size(&self, fitted: Size) -> Size {
        fitted.scale(self.zoom_scale)
    }

    /// On-screen frame of the zoomed item.
    pub fn item_frame(&self, bounds: Size, fitted: Size) -> Rect {
        let size = self.content_size(fitted);
        let center = content_center(bounds, size);
        Rect::from_center_size(
            Point::new(
                center.x - self.content_offset.x,
                center.y - self.content_offset.y,
            ),
            size,
        )
    }

    pub fn clamp_zoom(&self, scale: f32) -> f32 {
        scale.clamp(self.minimum_zoom_scale, self.maximum_zoom_scale)
    }
}

pub fn maximum_zoom_scale(bounds: Size, fitted: Size, configured_maximum: f32) -> f32 {
    configured_maximum
        .max(aspect_fill_scale(bounds, fitted))
        .max(MINIMUM_ZOOM_SCALE)
}

/// Keeps the scroll position inside the scrollable range.
pub fn clamp_offset(offset: Point, content: Size, bounds: Size) -> Point {
    let max_x = (content.width - bounds.width).max(0.0);
    let max_y = (content.height - bounds.height).max(0.0);
    Point::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y))
}

/// Zoom and offset a double tap at `touch` (item coordinates) animates to.
///
/// At scale 1, or beyond the fill scale, the item zooms to fill the bounds
/// around the touch; anywhere in between it returns to scale 1.
pub fn double_tap_target(state: &ScrollState, bounds: Size, fitted: Size, touch: Point) -> ScrollState {
    let fill = aspect_fill_scale(bounds, fitted);
    if fill <= 0.0 {
        return *state;
    }
    if state.zoom_scale == MINIMUM_ZOOM_SCALE || state.zoom_scale > fill {
        let visible = zoom_rect(bounds, fill, touch);
        let offset = Point::new(visible.x * fill, visible.y * fill);
        ScrollState {
            zoom_scale: fill,
            content_offset: clamp_offset(offset, fitted.scale(fill), bounds),
            ..*state
        }
    } else {
        ScrollState {
            zoom_scale: MINIMUM_ZOOM_SCALE,
            content_offset: Point::ZERO,
            ..*state
        }
    }
}

/// Applies a pinch of `factor` relative to `start`, keeping the content
/// under `focal` (bounds coordinates) in place.
pub fn pinch_zoom(start: &ScrollState, factor: f32, focal: Point, bounds: Size, fitted: Size) -> ScrollState {
    if !factor.is_finite() || factor <= 0.0 || start.zoom_scale <= 0.0 {
        return *start;
    }
    let zoom_scale = start.clamp_zoom(start.zoom_scale * factor);
    let anchor = Point::new(
        (start.content_offset.x + focal.x) / start.zoom_scale,
        (start.content_offset.y + focal.y) / start.zoom_scale,
    );
    let offset = Point::new(
        anchor.x * zoom_scale - focal.x,
        anchor.y * zoom_scale - focal.y,
    );
    ScrollState {
        zoom_scale,
        content_offset: clamp_offset(offset, fitted.scale(zoom_scale), bounds),
        ..*start
    }
}

/// Scrolls zoomed content by a pan `translation` measured from `start`.
pub fn pan_offset(start: &ScrollState, translation: Vector2, bounds: Size, fitted: Size) -> Point {
    let offset = Point::new(
        start.content_offset.x - translation.x,
        start.content_offset.y - translation.y,
    );
    clamp_offset(offset, start.content_size(fitted), bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Size = Size::new(400.0, 800.0);
    const FITTED: Size = Size::new(400.0, 300.0);

    #[test]
    fn maximum_covers_the_fill_scale() {
        let fill = aspect_fill_scale(BOUNDS, FITTED);
        assert!((fill - 800.0 / 300.0).abs() < 1e-5);
        assert_eq!(maximum_zoom_scale(BOUNDS, FITTED, 8.0), 8.0);
        assert_eq!(maximum_zoom_scale(BOUNDS, FITTED, 2.0), fill);
    }

    #[test]
    fn double_tap_toggles_between_one_and_fill() {
        let state = ScrollState::new(BOUNDS, FITTED, 8.0);
        let zoomed = double_tap_target(&state, BOUNDS, FITTED, Point::new(200.0, 150.0));
        let fill = aspect_fill_scale(BOUNDS, FITTED);
        assert_eq!(zoomed.zoom_scale, fill);
        let content = FITTED.scale(fill);
        assert!(zoomed.content_offset.x >= 0.0);
        assert!(zoomed.content_offset.x <= content.width - BOUNDS.width);
        assert_eq!(zoomed.content_offset.y, 0.0);

        let back = double_tap_target(&zoomed, BOUNDS, FITTED, Point::new(10.0, 10.0));
        assert_eq!(back.zoom_scale, 1.0);
        assert_eq!(back.content_offset, Point::ZERO);
    }

    #[test]
    fn double_tap_past_fill_zooms_back_to_fill() {
        let state = ScrollState {
            zoom_scale: 6.0,
            ..ScrollState::new(BOUNDS, FITTED, 8.0)
        };
        let target = double_tap_target(&state, BOUNDS, FITTED, Point::new(0.0, 0.0));
        assert_eq!(target.zoom_scale, aspect_fill_scale(BOUNDS, FITTED));
        assert_eq!(target.content_offset, Point::ZERO);
    }

    #[test]
    fn offsets_stay_within_the_content() {
        let content = Size::new(1000.0, 900.0);
        assert_eq!(
            clamp_offset(Point::new(-10.0, 500.0), content, BOUNDS),
            Point::new(0.0, 100.0)
        );
        assert_eq!(
            clamp_offset(Point::new(50.0, 50.0), Size::new(100.0, 100.0), BOUNDS),
            Point::ZERO
        );
    }

    #[test]
    fn pinch_clamps_and_keeps_the_focal_point() {
        let state = ScrollState::new(BOUNDS, FITTED, 4.0);
        let zoomed = pinch_zoom(&state, 2.0, Point::new(200.0, 150.0), BOUNDS, FITTED);
        assert_eq!(zoomed.zoom_scale, 2.0);
        assert_eq!(zoomed.content_offset.x, 200.0);

        let max = pinch_zoom(&zoomed, 10.0, Point::ZERO, BOUNDS, FITTED);
        assert_eq!(max.zoom_scale, 4.0);
        let min = pinch_zoom(&zoomed, 0.1, Point::ZERO, BOUNDS, FITTED);
        assert_eq!(min.zoom_scale, 1.0);
        assert_eq!(min.content_offset, Point::ZERO);
    }

    #[test]
    fn item_frame_is_centered_at_rest() {
        let state = ScrollState::new(BOUNDS, FITTED, 8.0);
        assert_eq!(
            state.item_frame(BOUNDS, FITTED),
            Rect::new(0.0, 250.0, 400.0, 300.0)
        );
    }
}
