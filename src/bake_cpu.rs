//! CPU baker: commits a pending transform into pixels by inverse-mapped
//! bilinear resampling over the transformed bounding box.

use crate::affine;
use crate::core::{Affine, Color, PixelBuffer, Point};
use crate::pending::PendingImage;

/// Hard ceiling for either side of a bake target, in pixels.
pub const MAX_BAKE_SIDE: i64 = 16_384;

// Snap for corners that land within float noise of an exact integer, so a
// 90-degree rotation of an N x N image stays N x N.
const BOUNDS_SNAP: f64 = 1e-9;

/// Result of a bake request.
#[derive(Clone, Debug)]
pub enum BakeOutcome {
    /// A new image whose remaining transform is translation-only placement.
    /// When the input had no effective transform the buffer is reused.
    Baked(PendingImage),
    /// The input, returned untouched.
    Skipped {
        image: PendingImage,
        reason: SkipReason,
    },
}

impl BakeOutcome {
    /// The resulting image either way.
    pub fn into_image(self) -> PendingImage {
        match self {
            Self::Baked(image) => image,
            Self::Skipped { image, .. } => image,
        }
    }
}

/// Why a bake request left the input untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The bake policy deferred resampling; nothing would visibly change.
    DeferredByPolicy,
    /// The transformed bounding box collapsed or exceeded [`MAX_BAKE_SIDE`]
    /// on a side. Surfaced to the caller as a warning, never a failure.
    OversizedTarget { width: i64, height: i64 },
}

struct TargetBounds {
    min_x: i64,
    min_y: i64,
    width: i64,
    height: i64,
}

/// Resample `image`'s pending transform into a new buffer.
///
/// Sample positions that fall outside the source rectangle produce
/// `out_of_bounds`; in-range positions clamp their edge taps.
pub fn bake(image: &PendingImage, out_of_bounds: Color) -> BakeOutcome {
    let Some(transform) = image.transform() else {
        return BakeOutcome::Baked(image.cleared());
    };
    if affine::is_identity(transform) {
        return BakeOutcome::Baked(image.cleared());
    }

    let src = image.buffer();
    let bounds = transformed_bounds(transform, src.width, src.height);
    if bounds.width <= 0
        || bounds.height <= 0
        || bounds.width > MAX_BAKE_SIDE
        || bounds.height > MAX_BAKE_SIDE
    {
        tracing::warn!(
            width = bounds.width,
            height = bounds.height,
            "bake target out of range, returning input unchanged"
        );
        return BakeOutcome::Skipped {
            image: image.clone(),
            reason: SkipReason::OversizedTarget {
                width: bounds.width,
                height: bounds.height,
            },
        };
    }

    let inverse = affine::invert(transform);
    let (dst_w, dst_h) = (bounds.width as u32, bounds.height as u32);
    let mut data = Vec::with_capacity(dst_w as usize * dst_h as usize * 4);
    for y in 0..dst_h {
        for x in 0..dst_w {
            let world = Point::new(
                f64::from(x) + bounds.min_x as f64,
                f64::from(y) + bounds.min_y as f64,
            );
            let src_pos = affine::apply_to_point(inverse, world);
            let c = sample_bilinear(src, src_pos.x, src_pos.y, out_of_bounds);
            data.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }
    let baked = PixelBuffer {
        width: dst_w,
        height: dst_h,
        data,
    };

    // The renderer centers an image's local origin at half its size before
    // applying any transform, so the dimension change must be absorbed into
    // the translation to keep the on-screen position fixed.
    let placement = affine::translate(
        bounds.min_x as f64 + (bounds.width - i64::from(src.width)) as f64 * 0.5,
        bounds.min_y as f64 + (bounds.height - i64::from(src.height)) as f64 * 0.5,
    );
    BakeOutcome::Baked(PendingImage::pending(baked, placement))
}

fn transformed_bounds(transform: Affine, src_w: u32, src_h: u32) -> TargetBounds {
    let (w, h) = (f64::from(src_w), f64::from(src_h));
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(0.0, h),
        Point::new(w, h),
    ];

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for corner in corners {
        let p = affine::apply_to_point(transform, corner);
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let min_x = (min_x + BOUNDS_SNAP).floor() as i64;
    let min_y = (min_y + BOUNDS_SNAP).floor() as i64;
    let max_x = (max_x - BOUNDS_SNAP).ceil() as i64;
    let max_y = (max_y - BOUNDS_SNAP).ceil() as i64;
    TargetBounds {
        min_x,
        min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}

/// 4-tap bilinear sample at `(x, y)` in source pixel coordinates.
fn sample_bilinear(src: &PixelBuffer, x: f64, y: f64, out_of_bounds: Color) -> Color {
    let w = f64::from(src.width);
    let h = f64::from(src.height);
    if x < 0.0 || y < 0.0 || x >= w || y >= h {
        return out_of_bounds;
    }

    let x0f = x.floor();
    let y0f = y.floor();
    let fx = (x - x0f) as f32;
    let fy = (y - y0f) as f32;

    let last_x = i64::from(src.width) - 1;
    let last_y = i64::from(src.height) - 1;
    let x0 = (x0f as i64).clamp(0, last_x);
    let y0 = (y0f as i64).clamp(0, last_y);
    let x1 = (x0 + 1).min(last_x);
    let y1 = (y0 + 1).min(last_y);

    let v00 = src.pixel(x0 as u32, y0 as u32);
    let v10 = src.pixel(x1 as u32, y0 as u32);
    let v01 = src.pixel(x0 as u32, y1 as u32);
    let v11 = src.pixel(x1 as u32, y1 as u32);

    let w00 = (1.0 - fx) * (1.0 - fy);
    let w10 = fx * (1.0 - fy);
    let w01 = (1.0 - fx) * fy;
    let w11 = fx * fy;
    Color {
        r: v00.r * w00 + v10.r * w10 + v01.r * w01 + v11.r * w11,
        g: v00.g * w00 + v10.g * w10 + v01.g * w01 + v11.g * w11,
        b: v00.b * w00 + v10.b * w10 + v01.b * w01 + v11.b * w11,
        a: v00.a * w00 + v10.a * w10 + v01.a * w01 + v11.a * w11,
    }
}
