//! Policy deciding whether a pending transform must be resampled now.
//!
//! Resampling is the most costly and lossy step in the pipeline, so it is
//! deferred until a rotated image could plausibly clip visible content
//! against the background. Translation never changes pixels; scale alone
//! cannot clip its own axis-aligned bounding box; rotation only clips when
//! border content differs from the background it would be clipped against.

use crate::affine;
use crate::core::{Color, PixelBuffer};
use crate::pending::PendingImage;

/// Per-channel tolerance when matching border pixels against the background.
pub const BORDER_MATCH_TOLERANCE: f32 = 1.0 / 255.0;

/// True when `image`'s pending transform must be baked before a consumer
/// that composites against `background` can use it.
pub fn should_bake(image: &PendingImage, background: Color) -> bool {
    let Some(t) = image.transform() else {
        return false;
    };
    if affine::is_identity(t) {
        return false;
    }
    // Placement only, no pixel change.
    if affine::is_pure_translation(t) {
        return false;
    }
    // Non-uniform scale alone cannot clip its own bounding box.
    if !affine::has_rotation(t) {
        return false;
    }
    !border_matches_background(image.buffer(), background)
}

/// Scan the outer border (top row, bottom row, left/right columns). If every
/// border pixel matches the background, rotation cannot visibly clip content.
fn border_matches_background(buffer: &PixelBuffer, background: Color) -> bool {
    let (w, h) = (buffer.width, buffer.height);
    for x in 0..w {
        if !buffer
            .pixel(x, 0)
            .channels_within(background, BORDER_MATCH_TOLERANCE)
            || !buffer
                .pixel(x, h - 1)
                .channels_within(background, BORDER_MATCH_TOLERANCE)
        {
            return false;
        }
    }
    for y in 0..h {
        if !buffer
            .pixel(0, y)
            .channels_within(background, BORDER_MATCH_TOLERANCE)
            || !buffer
                .pixel(w - 1, y)
                .channels_within(background, BORDER_MATCH_TOLERANCE)
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn background() -> Color {
        Color::new(0.1, 0.1, 0.1, 1.0)
    }

    fn all_background_image(transform: crate::core::Affine) -> PendingImage {
        let buf = PixelBuffer::filled(100, 100, background()).unwrap();
        PendingImage::pending(buf, transform)
    }

    #[test]
    fn no_transform_never_bakes() {
        let img = PendingImage::baked(PixelBuffer::filled(8, 8, background()).unwrap());
        assert!(!should_bake(&img, background()));
    }

    #[test]
    fn pure_translation_never_bakes() {
        let img = all_background_image(affine::translate(250.0, -31.5));
        assert!(!should_bake(&img, background()));
    }

    #[test]
    fn scale_without_rotation_never_bakes() {
        let img = all_background_image(affine::scale(2.0, 1.0));
        assert!(!should_bake(&img, background()));
    }

    #[test]
    fn rotation_over_background_borders_defers() {
        let t = affine::create_pivot_transform(1.0, 1.0, FRAC_PI_4, 50.0, 50.0, 0.0, 0.0);
        let img = all_background_image(t);
        assert!(!should_bake(&img, background()));
    }

    #[test]
    fn rotation_with_content_on_the_border_bakes() {
        let mut buf = PixelBuffer::filled(100, 100, background()).unwrap();
        buf.set_pixel(99, 42, Color::opaque(1.0, 1.0, 1.0));
        let t = affine::create_pivot_transform(1.0, 1.0, FRAC_PI_4, 50.0, 50.0, 0.0, 0.0);
        let img = PendingImage::pending(buf, t);
        assert!(should_bake(&img, background()));
    }

    #[test]
    fn border_match_respects_the_tolerance() {
        // 0.5/255 off the background is within tolerance everywhere.
        let mut buf = PixelBuffer::filled(16, 16, background()).unwrap();
        let near = Color::new(0.1 + 0.5 / 255.0, 0.1, 0.1, 1.0);
        buf.set_pixel(0, 7, near);
        let t = affine::rotate(FRAC_PI_4);
        let img = PendingImage::pending(buf, t);
        assert!(!should_bake(&img, background()));
    }
}
