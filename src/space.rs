//! Typed wrappers for the coordinate spaces the pipeline moves between.
//!
//! Five spaces show up in transform editing: screen pixels, compositor
//! world space, an image's own pixel grid, positions relative to the image
//! center, and the normalized pivot convention. Mixing them up compiles
//! fine with bare vectors, so each gets its own type and conversions are
//! explicit.

use crate::affine;
use crate::core::{Affine, Point, Vec2};

/// Position in window/screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint(pub Point);

/// Position in compositor world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint(pub Point);

/// Displacement in world space (e.g. a drag delta).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldVec(pub Vec2);

/// Position in an image's own pixel grid, origin at the top-left texel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalPoint(pub Point);

/// Displacement in image-local space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalVec(pub Vec2);

impl LocalVec {
    /// Map a world-space displacement into image-local units through the
    /// inverse of a transform's rotate-scale part,
    /// `inverse(Rotate(angle) ∘ Scale(sx, sy))`.
    pub fn from_world(world: WorldVec, scale_x: f64, scale_y: f64, angle_radians: f64) -> Self {
        let (sin, cos) = angle_radians.sin_cos();
        Self(Vec2::new(
            (cos * world.0.x + sin * world.0.y) / scale_x,
            (-sin * world.0.x + cos * world.0.y) / scale_y,
        ))
    }
}

/// Position relative to an image's own center, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FromCenter(pub Vec2);

/// Pivot as a fraction of the image size: (0,0) top-left, (1,1) bottom-right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPivot(pub Vec2);

impl WorldPoint {
    /// Map a screen position into world space through the view transform.
    pub fn from_screen(view: Affine, p: ScreenPoint) -> Self {
        Self(affine::apply_to_point(affine::invert(view), p.0))
    }
}

impl LocalPoint {
    pub fn from_center(fc: FromCenter, width: u32, height: u32) -> Self {
        Self(Point::new(
            fc.0.x + f64::from(width) * 0.5,
            fc.0.y + f64::from(height) * 0.5,
        ))
    }

    pub fn to_from_center(self, width: u32, height: u32) -> FromCenter {
        FromCenter(Vec2::new(
            self.0.x - f64::from(width) * 0.5,
            self.0.y - f64::from(height) * 0.5,
        ))
    }
}

impl FromCenter {
    pub const ZERO: Self = Self(Vec2::ZERO);

    pub fn to_normalized(self, width: u32, height: u32) -> NormalizedPivot {
        NormalizedPivot(Vec2::new(
            (self.0.x + f64::from(width) * 0.5) / f64::from(width),
            (self.0.y + f64::from(height) * 0.5) / f64::from(height),
        ))
    }
}

impl NormalizedPivot {
    /// The image center.
    pub const CENTER: Self = Self(Vec2::new(0.5, 0.5));

    pub fn to_from_center(self, width: u32, height: u32) -> FromCenter {
        FromCenter(Vec2::new(
            self.0.x * f64::from(width) - f64::from(width) * 0.5,
            self.0.y * f64::from(height) - f64::from(height) * 0.5,
        ))
    }
}
