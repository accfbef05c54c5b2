//! Shared gesture constants for consistent touch handling.
//!
//! Values are in logical pixels and milliseconds.

/// Distance a pointer must travel from its press position before a pan
/// begins. Below it, a release counts as a tap.
///
/// Matches common platform touch slop (Android uses ~8dp).
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum release velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// A second tap must land within this window to form a double tap.
pub const DOUBLE_TAP_TIMEOUT_MS: i64 = 300;

/// A second tap must land within this distance of the first.
pub const DOUBLE_TAP_SLOP: f32 = 100.0;

/// Presses held longer than this never count as taps.
pub const TAP_TIMEOUT_MS: i64 = 500;
