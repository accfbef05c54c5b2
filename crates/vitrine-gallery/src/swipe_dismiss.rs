//! Swipe-to-dismiss state machine.
//!
//! Pure bookkeeping: the machine turns pan translations into a content offset
//! and a progress value, and a release into a [`Resolution`]. Animating the
//! resolution is the item controller's job.
//!
//! Offsets follow scroll-view semantics: a positive vertical offset means the
//! content moved up, so it is the negated translation.

use vitrine_geometry::{Rect, Size, Vector2};

use crate::paging::PagingContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Horizontal only when strictly dominant.
    pub fn of(velocity: Vector2) -> Self {
        if velocity.x.abs() > velocity.y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    pub fn component(self, vector: Vector2) -> f32 {
        match self {
            Axis::Horizontal => vector.x,
            Axis::Vertical => vector.y,
        }
    }

    pub fn extent(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    pub fn vector(self, value: f32) -> Vector2 {
        match self {
            Axis::Horizontal => Vector2::new(value, 0.0),
            Axis::Vertical => Vector2::new(0.0, value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SwipeState {
    #[default]
    Idle,
    Tracking(Axis),
    Committing(Axis),
    Cancelling(Axis),
}

impl SwipeState {
    pub fn axis(self) -> Option<Axis> {
        match self {
            SwipeState::Idle => None,
            SwipeState::Tracking(axis)
            | SwipeState::Committing(axis)
            | SwipeState::Cancelling(axis) => Some(axis),
        }
    }
}

/// Host-readable snapshot of an item's interactive transition.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TransitionState {
    pub orientation_lock: Option<Axis>,
    pub progress: f32,
    pub origin_frame: Option<Rect>,
    pub is_animating: bool,
}

/// Sizes the offset is measured against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeGeometry {
    pub bounds: Size,
    pub item: Size,
}

impl SwipeGeometry {
    pub fn new(bounds: Size, item: Size) -> Self {
        Self { bounds, item }
    }

    /// Offset at which the item has fully left the bounds along `axis`.
    pub fn distance_to_edge(&self, axis: Axis) -> f32 {
        axis.extent(self.bounds) / 2.0 + axis.extent(self.item) / 2.0
    }
}

/// Terminal outcome of a released swipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resolution {
    /// Keep moving at the release velocity until `target` is reached.
    Fling {
        axis: Axis,
        target: f32,
        velocity: f32,
    },
    /// Dismiss through the reverse displacement back to the thumbnail.
    DisplacementDismiss,
    /// Spring back to offset zero.
    Cancel,
}

impl Resolution {
    pub fn commits(&self) -> bool {
        !matches!(self, Resolution::Cancel)
    }
}

/// Offset along `axis` for a pan `translation`.
///
/// At either end of a multi-item gallery, the horizontal offset is clamped
/// so the content can only be pulled away from the collection.
pub fn swipe_offset(axis: Axis, translation: Vector2, context: &PagingContext) -> f32 {
    match axis {
        Axis::Vertical => -translation.y,
        Axis::Horizontal => {
            let offset = -translation.x;
            if context.item_count == 1 {
                offset
            } else if context.is_first() {
                offset.min(0.0)
            } else if context.is_last() {
                offset.max(0.0)
            } else {
                offset
            }
        }
    }
}

/// `min(1, |offset| / distance_to_edge)`; zero for degenerate geometry.
pub fn dismiss_progress(offset: f32, distance_to_edge: f32) -> f32 {
    if distance_to_edge.is_nan() || distance_to_edge <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset.abs() / distance_to_edge).min(1.0)
}

/// Ordered release rules; the first match wins. Exceeding the threshold
/// requires strict inequality.
pub fn resolve_release(
    axis: Axis,
    velocity: Vector2,
    context: &PagingContext,
    geometry: SwipeGeometry,
    threshold: f32,
) -> Resolution {
    let distance = geometry.distance_to_edge(axis);
    match axis {
        Axis::Vertical if velocity.y < -threshold => Resolution::Fling {
            axis,
            target: distance,
            velocity: velocity.y,
        },
        Axis::Vertical if velocity.y > threshold => Resolution::DisplacementDismiss,
        Axis::Horizontal if context.is_first() && velocity.x > threshold => Resolution::Fling {
            axis,
            target: -distance,
            velocity: velocity.x,
        },
        Axis::Horizontal if context.is_last() && velocity.x < -threshold => Resolution::Fling {
            axis,
            target: distance,
            velocity: velocity.x,
        },
        _ => Resolution::Cancel,
    }
}

#[derive(Clone, Debug, Default)]
pub struct SwipeToDismiss {
    state: SwipeState,
    offset: f32,
    progress: f32,
    origin_frame: Option<Rect>,
}

impl SwipeToDismiss {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SwipeState {
        self.state
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn origin_frame(&self) -> Option<Rect> {
        self.origin_frame
    }

    pub fn is_idle(&self) -> bool {
        self.state == SwipeState::Idle
    }

    /// Locks the axis from the pan's initial velocity. Only valid from idle.
    pub fn begin(&mut self, velocity: Vector2, origin_frame: Option<Rect>) -> Option<Axis> {
        if !self.is_idle() {
            return None;
        }
        let axis = Axis::of(velocity);
        self.state = SwipeState::Tracking(axis);
        self.offset = 0.0;
        self.progress = 0.0;
        self.origin_frame = origin_frame;
        Some(axis)
    }

    /// Applies a pan move and returns the new progress.
    pub fn update(
        &mut self,
        translation: Vector2,
        context: &PagingContext,
        geometry: SwipeGeometry,
    ) -> Option<f32> {
        let SwipeState::Tracking(axis) = self.state else {
            return None;
        };
        Some(self.set_offset(swipe_offset(axis, translation, context), geometry))
    }

    /// Records an offset produced by an animation and returns its progress.
    pub fn set_offset(&mut self, offset: f32, geometry: SwipeGeometry) -> f32 {
        self.offset = offset;
        self.progress = match self.state.axis() {
            Some(axis) => dismiss_progress(offset, geometry.distance_to_edge(axis)),
            None => 0.0,
        };
        self.progress
    }

    pub fn release(
        &mut self,
        velocity: Vector2,
        context: &PagingContext,
        geometry: SwipeGeometry,
        threshold: f32,
    ) -> Option<Resolution> {
        let SwipeState::Tracking(axis) = self.state else {
            return None;
        };
        let resolution = resolve_release(axis, velocity, context, geometry, threshold);
        self.state = if resolution.commits() {
            SwipeState::Committing(axis)
        } else {
            SwipeState::Cancelling(axis)
        };
        Some(resolution)
    }

    /// Returns to idle once the resolution's animation is over.
    pub fn finish(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[path = "tests/swipe_dismiss_tests.rs"]
mod tests;
