//! Counter-rotation for hosts locked to a single interface orientation.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::{Point, Rect, Size};

/// Physical orientation of the device, or the orientation an interface is
/// locked to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
}

impl Orientation {
    /// Face up/down carry no information about which edge is on top.
    pub fn is_flat(&self) -> bool {
        matches!(self, Orientation::FaceUp | Orientation::FaceDown)
    }

    pub fn is_landscape(&self) -> bool {
        matches!(self, Orientation::LandscapeLeft | Orientation::LandscapeRight)
    }

    /// Rotation of the content relative to portrait, in radians.
    pub fn angle(&self) -> f32 {
        match self {
            Orientation::LandscapeLeft => FRAC_PI_2,
            Orientation::LandscapeRight => -FRAC_PI_2,
            Orientation::PortraitUpsideDown => PI,
            Orientation::Portrait | Orientation::FaceUp | Orientation::FaceDown => 0.0,
        }
    }
}

/// 2D affine transform in the `[a b; c d] + [tx ty]` form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AffineTransform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform {
    pub const IDENTITY: AffineTransform = AffineTransform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn rotation(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Rotation angle encoded in the transform, in radians.
    pub fn angle(&self) -> f32 {
        self.b.atan2(self.a)
    }

    pub fn is_identity(&self) -> bool {
        const EPSILON: f32 = 1e-6;
        (self.a - 1.0).abs() < EPSILON
            && self.b.abs() < EPSILON
            && self.c.abs() < EPSILON
            && (self.d - 1.0).abs() < EPSILON
            && self.tx.abs() < EPSILON
            && self.ty.abs() < EPSILON
    }

    /// Inverse transform; a singular matrix inverts to identity.
    pub fn inverted(&self) -> Self {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f32::EPSILON {
            return Self::IDENTITY;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Self {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + c * self.ty),
            ty: -(b * self.tx + d * self.ty),
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.tx,
            self.b * point.x + self.d * point.y + self.ty,
        )
    }
}

/// Transform and bounds that visually counter-rotate a view locked to
/// `current` so that it reads upright on a device held in `device`.
///
/// Flat device orientations keep the current layout. Calling this twice with
/// the same arguments yields the same result.
pub fn rotation_adjusted_bounds(
    current: Orientation,
    device: Orientation,
    screen: Size,
) -> (AffineTransform, Rect) {
    if device.is_flat() || device == current {
        return (AffineTransform::IDENTITY, Rect::from_size(screen));
    }
    let transform = AffineTransform::rotation(device.angle() - current.angle());
    let bounds = if device.is_landscape() != current.is_landscape() {
        Rect::from_size(screen.transposed())
    } else {
        Rect::from_size(screen)
    };
    (transform, bounds)
}

#[cfg(test)]
#[path = "tests/rotation_tests.rs"]
mod tests;
