//! GPU-texture collaborator boundary.
//!
//! Textures cannot carry a pending transform, so baking a texture-backed
//! image means download → CPU bake → re-upload, all through the external
//! pool's contract. This crate never allocates GPU memory directly.

use crate::bake_cpu::{self, BakeOutcome, SkipReason};
use crate::core::{Affine, Color, PixelBuffer};
use crate::error::{LatebakeError, LatebakeResult};
use crate::pending::PendingImage;

/// Opaque id of a texture owned by the external, reference-counted pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Contract consumed from the external texture pool.
pub trait TextureBackend {
    fn create_texture_from_pixels(&mut self, pixels: &PixelBuffer) -> LatebakeResult<TextureId>;
    fn download_texture_to_pixels(&mut self, id: TextureId) -> LatebakeResult<PixelBuffer>;
    fn retain(&mut self, id: TextureId);
    fn release(&mut self, id: TextureId);
}

/// A texture plus the transform the compositor has not yet committed to it.
#[derive(Clone, Copy, Debug)]
pub struct TextureImage {
    pub texture: TextureId,
    pub transform: Option<Affine>,
}

/// Result of baking a texture-backed image.
#[derive(Clone, Copy, Debug)]
pub enum TextureBakeOutcome {
    /// A freshly uploaded texture of resampled pixels, plus its
    /// translation-only placement.
    Baked {
        texture: TextureId,
        placement: Affine,
    },
    /// The input texture, untouched.
    Skipped {
        texture: TextureId,
        reason: SkipReason,
    },
}

/// Bake `image`'s pending transform through the texture pool.
///
/// The source texture is retained for the duration of the
/// download/bake/upload sequence and released on every exit path, error
/// paths included. Nodes without a GPU context must route through the CPU
/// buffer path ([`bake_cpu::bake`]) instead.
pub fn bake_texture(
    backend: &mut dyn TextureBackend,
    image: TextureImage,
    out_of_bounds: Color,
) -> LatebakeResult<TextureBakeOutcome> {
    backend.retain(image.texture);
    let outcome = bake_downloaded(backend, image, out_of_bounds);
    backend.release(image.texture);
    outcome
}

fn bake_downloaded(
    backend: &mut dyn TextureBackend,
    image: TextureImage,
    out_of_bounds: Color,
) -> LatebakeResult<TextureBakeOutcome> {
    let Some(transform) = image.transform else {
        return Ok(TextureBakeOutcome::Skipped {
            texture: image.texture,
            reason: SkipReason::DeferredByPolicy,
        });
    };

    let pixels = backend.download_texture_to_pixels(image.texture)?;
    let pending = PendingImage::pending(pixels, transform);
    match bake_cpu::bake(&pending, out_of_bounds) {
        BakeOutcome::Baked(baked) => {
            // Upload last, so no texture can leak if an earlier step fails.
            let texture = backend.create_texture_from_pixels(baked.buffer())?;
            let placement = baked.transform().unwrap_or(Affine::IDENTITY);
            Ok(TextureBakeOutcome::Baked { texture, placement })
        }
        BakeOutcome::Skipped { reason, .. } => Ok(TextureBakeOutcome::Skipped {
            texture: image.texture,
            reason,
        }),
    }
}

/// Stand-in backend for node paths evaluated with no GPU available.
///
/// Every pixel operation fails with a gpu error; retain/release are no-ops
/// since there is nothing to count.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGpuContext;

impl TextureBackend for NoGpuContext {
    fn create_texture_from_pixels(&mut self, _pixels: &PixelBuffer) -> LatebakeResult<TextureId> {
        Err(LatebakeError::gpu("no GPU context: texture upload unavailable"))
    }

    fn download_texture_to_pixels(&mut self, _id: TextureId) -> LatebakeResult<PixelBuffer> {
        Err(LatebakeError::gpu(
            "no GPU context: texture download unavailable",
        ))
    }

    fn retain(&mut self, _id: TextureId) {}

    fn release(&mut self, _id: TextureId) {}
}
