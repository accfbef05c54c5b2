//! Decides whether swipe-to-dismiss owns a pan or leaves it to paging.

use vitrine_geometry::Vector2;

use crate::config::{PagingMode, SwipeToDismissMode};
use crate::paging::PagingContext;

/// Velocities at or below this (points per second) carry no direction.
pub const MIN_ARBITRATION_VELOCITY: f32 = 1.0;

/// Whether swipe-to-dismiss should claim a pan that starts with `velocity`.
///
/// Vertical-dominant pans (ties included) are claimed when vertical dismissal
/// is enabled. Horizontal pans are claimed only when they pull away from the
/// first or last item of a non-carousel gallery; everything else pages.
pub fn should_claim(
    velocity: Vector2,
    context: &PagingContext,
    mode: SwipeToDismissMode,
) -> bool {
    if velocity.is_near_zero(MIN_ARBITRATION_VELOCITY) || context.item_count == 0 {
        return false;
    }
    if velocity.y.abs() >= velocity.x.abs() {
        return mode.contains(SwipeToDismissMode::VERTICAL);
    }
    let toward_start = velocity.x > 0.0 && context.is_first();
    let toward_end = velocity.x < 0.0 && context.is_last();
    (toward_start || toward_end)
        && context.paging_mode == PagingMode::Standard
        && mode.contains(SwipeToDismissMode::HORIZONTAL)
}

/// Caches one [`should_claim`] decision per gesture.
#[derive(Debug, Default)]
pub struct GestureArbiter {
    decision: Option<bool>,
}

impl GestureArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates on the first call of a gesture and replays that answer
    /// until [`GestureArbiter::reset`].
    pub fn arbitrate(
        &mut self,
        velocity: Vector2,
        context: &PagingContext,
        mode: SwipeToDismissMode,
    ) -> bool {
        *self
            .decision
            .get_or_insert_with(|| should_claim(velocity, context, mode))
    }

    pub fn decision(&self) -> Option<bool> {
        self.decision
    }

    pub fn reset(&mut self) {
        self.decision = None;
    }
}

#[cfg(test)]
#[path = "tests/arbiter_tests.rs"]
mod tests;
