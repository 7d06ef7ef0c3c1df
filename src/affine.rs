//! Transform algebra over [`kurbo::Affine`]: composition, inversion, and the
//! classification predicates the bake policy depends on.
//!
//! The epsilons here are fixed engine-wide constants. Callers must not
//! substitute their own; the bake policy and the solver both assume these
//! exact thresholds.

use crate::core::{Affine, Point, Vec2};

/// Per-coefficient tolerance for the classification predicates.
pub const CLASSIFY_EPSILON: f64 = 1e-6;

/// Determinant magnitude below which a transform is treated as degenerate.
pub const DEGENERACY_EPSILON: f64 = 1e-10;

pub fn identity() -> Affine {
    Affine::IDENTITY
}

pub fn translate(tx: f64, ty: f64) -> Affine {
    Affine::translate(Vec2::new(tx, ty))
}

pub fn scale(sx: f64, sy: f64) -> Affine {
    Affine::scale_non_uniform(sx, sy)
}

pub fn rotate(angle_radians: f64) -> Affine {
    Affine::rotate(angle_radians)
}

/// Compose two transforms; `inner` is applied first.
pub fn compose(outer: Affine, inner: Affine) -> Affine {
    outer * inner
}

/// Apply `t` to a point.
pub fn apply_to_point(t: Affine, p: Point) -> Point {
    t * p
}

/// True when `|det t| < ` [`DEGENERACY_EPSILON`].
pub fn is_degenerate(t: Affine) -> bool {
    t.determinant().abs() < DEGENERACY_EPSILON
}

/// Invert `t`.
///
/// A degenerate transform (a momentarily zero scale while the user edits is
/// valid input) inverts to identity instead of failing.
pub fn invert(t: Affine) -> Affine {
    if is_degenerate(t) {
        tracing::debug!(
            det = t.determinant(),
            "degenerate transform inverted to identity"
        );
        return Affine::IDENTITY;
    }
    t.inverse()
}

/// True when every coefficient is within [`CLASSIFY_EPSILON`] of identity.
pub fn is_identity(t: Affine) -> bool {
    let [a, b, c, d, tx, ty] = t.as_coeffs();
    (a - 1.0).abs() <= CLASSIFY_EPSILON
        && b.abs() <= CLASSIFY_EPSILON
        && c.abs() <= CLASSIFY_EPSILON
        && (d - 1.0).abs() <= CLASSIFY_EPSILON
        && tx.abs() <= CLASSIFY_EPSILON
        && ty.abs() <= CLASSIFY_EPSILON
}

/// True when the linear part is within [`CLASSIFY_EPSILON`] of identity,
/// regardless of translation.
pub fn is_pure_translation(t: Affine) -> bool {
    let [a, b, c, d, _, _] = t.as_coeffs();
    (a - 1.0).abs() <= CLASSIFY_EPSILON
        && b.abs() <= CLASSIFY_EPSILON
        && c.abs() <= CLASSIFY_EPSILON
        && (d - 1.0).abs() <= CLASSIFY_EPSILON
}

/// True when either off-diagonal coefficient exceeds [`CLASSIFY_EPSILON`].
/// Shear counts as rotation for bake purposes.
pub fn has_rotation(t: Affine) -> bool {
    let [_, b, c, _, _, _] = t.as_coeffs();
    b.abs() > CLASSIFY_EPSILON || c.abs() > CLASSIFY_EPSILON
}

/// Build the canonical node transform:
/// translate(−pivot) → scale → rotate → translate(+pivot) → translate(tx, ty).
pub fn create_pivot_transform(
    scale_x: f64,
    scale_y: f64,
    angle_radians: f64,
    pivot_x: f64,
    pivot_y: f64,
    tx: f64,
    ty: f64,
) -> Affine {
    let unpivoted = compose(scale(scale_x, scale_y), translate(-pivot_x, -pivot_y));
    let rotated = compose(rotate(angle_radians), unpivoted);
    let repivoted = compose(translate(pivot_x, pivot_y), rotated);
    compose(translate(tx, ty), repivoted)
}
