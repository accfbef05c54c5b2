//! Pure geometry for Vitrine
//!
//! This crate contains the geometry primitives, the aspect fitting and zoom
//! helpers, and the rotation math used by the gallery engine. Nothing here
//! holds state.

mod fit;
mod geometry;
mod rotation;

pub use fit::*;
pub use geometry::*;
pub use rotation::*;

pub mod prelude {
    pub use crate::fit::{aspect_fill_scale, aspect_fit, content_center, zoom_rect};
    pub use crate::geometry::{Point, Rect, Size, Vector2};
    pub use crate::rotation::{rotation_adjusted_bounds, AffineTransform, Orientation};
}
