//! Planning of displacement and fade transitions.
//!
//! Presentation flies the item out of its thumbnail into the center of the
//! viewport; dismissal flies it back. When no usable thumbnail exists the
//! item fades instead.

use vitrine_animation::{AnimationSpec, AnimationType, Easing, SpringSpec};
use vitrine_geometry::{aspect_fit, Rect, Size};

use crate::config::GalleryConfig;
use crate::origin::{DisplaceableOrigin, DisplacedViewsProvider};

/// Damping of the flight back to the thumbnail.
pub const REVERSE_DISPLACEMENT_DAMPING: f32 = 0.95;

/// Whether a thumbnail at `frame` is on screen enough to fly to.
///
/// The viewport is shrunk by `margin` on every side first, so thumbnails
/// hugging the edges are treated as hidden.
pub fn origin_is_visible(frame: Rect, viewport: Rect, margin: f32) -> bool {
    frame.intersects(&viewport.inset_by(margin, margin))
}

/// The thumbnail for `index` if it exists and is visible enough.
pub fn visible_origin(
    provider: &dyn DisplacedViewsProvider,
    index: usize,
    viewport: Rect,
    margin: f32,
) -> Option<DisplaceableOrigin> {
    provider
        .displacement_origin(index)
        .filter(|origin| origin_is_visible(origin.frame, viewport, margin))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisplacementPlan {
    Flight {
        origin: DisplaceableOrigin,
        from: Rect,
        to: Rect,
    },
    Fade,
}

impl DisplacementPlan {
    pub fn origin(&self) -> Option<DisplaceableOrigin> {
        match self {
            DisplacementPlan::Flight { origin, .. } => Some(*origin),
            DisplacementPlan::Fade => None,
        }
    }
}

/// Final on-screen frame of an item: aspect-fit into the (possibly rotated)
/// bounds and centered in the viewport.
pub fn presented_frame(content: Size, viewport: Rect, rotated_bounds: Size) -> Rect {
    Rect::from_center_size(viewport.center(), aspect_fit(content, rotated_bounds))
}

pub fn plan_present(
    origin: Option<DisplaceableOrigin>,
    content: Size,
    viewport: Rect,
    rotated_bounds: Size,
) -> DisplacementPlan {
    match origin {
        Some(origin) => DisplacementPlan::Flight {
            origin,
            from: origin.frame,
            to: presented_frame(content, viewport, rotated_bounds),
        },
        None => DisplacementPlan::Fade,
    }
}

pub fn plan_dismiss(origin: Option<DisplaceableOrigin>, current_frame: Rect) -> DisplacementPlan {
    match origin {
        Some(origin) => DisplacementPlan::Flight {
            origin,
            from: current_frame,
            to: origin.frame,
        },
        None => DisplacementPlan::Fade,
    }
}

pub fn present_animation(config: &GalleryConfig) -> AnimationType {
    AnimationType::Spring(SpringSpec::with_duration(
        config.displacement_duration,
        config.spring_bounce,
    ))
}

pub fn dismiss_animation(config: &GalleryConfig) -> AnimationType {
    AnimationType::Spring(SpringSpec::with_duration(
        config.reverse_displacement_duration,
        REVERSE_DISPLACEMENT_DAMPING,
    ))
}

pub fn fade_animation(config: &GalleryConfig) -> AnimationType {
    AnimationType::Tween(AnimationSpec::from_seconds(
        config.item_fade_duration,
        Easing::EaseInOut,
    ))
}
