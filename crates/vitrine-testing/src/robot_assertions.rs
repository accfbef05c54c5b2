//! Assertion utilities for robot testing

use vitrine_geometry::Rect;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that every value is at least the one before it.
pub fn assert_non_decreasing(values: &[f32], msg: &str) {
    for pair in values.windows(2) {
        assert!(
            pair[1] >= pair[0],
            "{}: {} followed {} in {:?}",
            msg,
            pair[1],
            pair[0],
            values
        );
    }
}

/// Assert that every value lies in `[0, 1]`.
pub fn assert_unit_interval(values: &[f32], msg: &str) {
    for value in values {
        assert!(
            (0.0..=1.0).contains(value),
            "{}: {} outside [0, 1] in {:?}",
            msg,
            value,
            values
        );
    }
}

pub fn assert_count<T>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, found {}",
        msg,
        expected,
        items.len()
    );
}
