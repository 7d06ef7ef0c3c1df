//! Node-boundary orchestration: O(1) transform composition on the way into
//! a node, bake resolution on the way out.

use crate::bake_cpu::{self, BakeOutcome, SkipReason};
use crate::bake_decision;
use crate::core::{Color, TransformParameters};
use crate::pending::PendingImage;

/// Compose a transform node's parameters onto `image` without touching
/// pixels. The same buffer flows forward with updated metadata.
pub fn apply_transform_node(image: &PendingImage, params: TransformParameters) -> PendingImage {
    image.composed(params.to_affine())
}

/// Resolve `image` for a downstream node.
///
/// `requires_spatial_coherence` is the per-node-type flag (blur,
/// convolution, ...) that forces a bake regardless of the heuristic;
/// otherwise [`bake_decision::should_bake`] decides.
pub fn resolve_node_input(
    image: &PendingImage,
    requires_spatial_coherence: bool,
    background: Color,
    out_of_bounds: Color,
) -> BakeOutcome {
    if requires_spatial_coherence || bake_decision::should_bake(image, background) {
        bake_cpu::bake(image, out_of_bounds)
    } else {
        BakeOutcome::Skipped {
            image: image.clone(),
            reason: SkipReason::DeferredByPolicy,
        }
    }
}
