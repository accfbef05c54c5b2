//! Aspect fitting, centering and zoom rectangles.
//!
//! Every function here is total: degenerate (zero, negative or non-finite)
//! sizes produce zero-size results instead of NaN or infinities.

use crate::{Point, Rect, Size};

/// Largest size with `content`'s aspect ratio that fits entirely in `bounds`.
pub fn aspect_fit(content: Size, bounds: Size) -> Size {
    if content.is_degenerate() || bounds.is_degenerate() {
        return Size::ZERO;
    }
    let width_ratio = bounds.width / content.width;
    let height_ratio = bounds.height / content.height;
    let ratio = width_ratio.min(height_ratio);
    let fitted = content.scale(ratio);
    // Rounding may push one side a hair past the bounds.
    Size::new(
        fitted.width.min(bounds.width),
        fitted.height.min(bounds.height),
    )
}

/// Minimum scale at which `content` covers `bounding` on both axes.
///
/// Returns 0.0 when either size is degenerate.
pub fn aspect_fill_scale(bounding: Size, content: Size) -> f32 {
    if content.is_degenerate() || bounding.is_degenerate() {
        return 0.0;
    }
    let width_scale = bounding.width / content.width;
    let height_scale = bounding.height / content.height;
    width_scale.max(height_scale)
}

/// Center point for zoomed content of `content_size` inside `bounding`.
///
/// Content smaller than the bounds is centered; larger content is anchored
/// at its own center so scrolling covers it edge to edge.
pub fn content_center(bounding: Size, content_size: Size) -> Point {
    let horizontal_offset = if bounding.width > content_size.width {
        (bounding.width - content_size.width) * 0.5
    } else {
        0.0
    };
    let vertical_offset = if bounding.height > content_size.height {
        (bounding.height - content_size.height) * 0.5
    } else {
        0.0
    };
    Point::new(
        content_size.width * 0.5 + horizontal_offset,
        content_size.height * 0.5 + vertical_offset,
    )
}

/// Rectangle of `bounds_size / scale` centered as close to `focal_point` as
/// possible while staying inside `bounds_size`.
pub fn zoom_rect(bounds_size: Size, scale: f32, focal_point: Point) -> Rect {
    if bounds_size.is_degenerate() || !scale.is_finite() || scale <= 0.0 {
        return Rect::ZERO;
    }
    let size = Size::new(
        (bounds_size.width / scale).min(bounds_size.width),
        (bounds_size.height / scale).min(bounds_size.height),
    );
    let max_x = bounds_size.width - size.width;
    let max_y = bounds_size.height - size.height;
    let x = (focal_point.x - size.width / 2.0).clamp(0.0, max_x);
    let y = (focal_point.y - size.height / 2.0).clamp(0.0, max_y);
    Rect::from_origin_size(Point::new(x, y), size)
}

#[cfg(test)]
#[path = "tests/fit_tests.rs"]
mod tests;
