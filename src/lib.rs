//! Latebake is the deferred affine-transform core of a node-based image
//! compositor.
//!
//! Images flow through the node graph as a pixel buffer plus an optional
//! *pending* transform ([`PendingImage`]). Transform-editing nodes compose
//! matrices in O(1) without resampling; the engine bakes (resamples) only
//! when a downstream node demands spatial coherence or when [`should_bake`]
//! decides a rotation could visibly clip content. A closed-form solver
//! ([`solve_pivot_drag`]) keeps the rendered image stationary while its
//! pivot is dragged.
//!
//! # Pipeline overview
//!
//! 1. **Compose**: `PendingImage + TransformParameters -> PendingImage`
//!    (metadata only, shared buffer)
//! 2. **Decide**: [`should_bake`] / the node's `requires_spatial_coherence`
//!    flag
//! 3. **Bake**: [`bake`] resamples into a new buffer carrying a
//!    translation-only placement
//! 4. **Interact**: [`solve_pivot_drag`] produces one atomic pivot/offset
//!    update per drag event batch
//!
//! Texture-backed images go through [`bake_texture`], which downloads,
//! bakes on the CPU, and re-uploads via the external pool's contract.
#![forbid(unsafe_code)]

pub mod affine;
pub mod bake_cpu;
pub mod bake_decision;
pub mod core;
pub mod display;
pub mod error;
mod math;
pub mod pending;
pub mod pipeline;
pub mod pivot;
pub mod space;
pub mod texture;

pub use affine::{
    CLASSIFY_EPSILON, DEGENERACY_EPSILON, apply_to_point, compose, create_pivot_transform,
    has_rotation, invert, is_identity, is_pure_translation,
};
pub use bake_cpu::{BakeOutcome, MAX_BAKE_SIDE, SkipReason, bake};
pub use bake_decision::{BORDER_MATCH_TOLERANCE, should_bake};
pub use crate::core::{Affine, Color, PixelBuffer, Point, Rect, TransformParameters, Vec2};
pub use display::{ContentToken, DisplayCache, content_token, to_display_rgba8};
pub use error::{LatebakeError, LatebakeResult};
pub use pending::PendingImage;
pub use pipeline::{apply_transform_node, resolve_node_input};
pub use pivot::{
    AxisConstraint, PivotDragSession, PivotDragState, PivotDragUpdate, solve_pivot_drag,
};
pub use space::{
    FromCenter, LocalPoint, LocalVec, NormalizedPivot, ScreenPoint, WorldPoint, WorldVec,
};
pub use texture::{
    NoGpuContext, TextureBackend, TextureBakeOutcome, TextureId, TextureImage, bake_texture,
};
