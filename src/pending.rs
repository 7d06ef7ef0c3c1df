//! The image payload that flows between nodes: a shared pixel buffer plus
//! an optional uncommitted transform.

use std::sync::Arc;

use crate::affine;
use crate::core::{Affine, PixelBuffer};

/// An image in the node graph.
///
/// The pixel buffer is immutable once produced; composing a transform
/// yields a new metadata record sharing the same buffer. Consumers
/// pattern-match rather than probing an optional field:
///
/// - [`PendingImage::Baked`]: pixels are authoritative.
/// - [`PendingImage::Pending`]: pixels plus a transform not yet resampled
///   into them.
#[derive(Clone, Debug)]
pub enum PendingImage {
    Baked(Arc<PixelBuffer>),
    Pending(Arc<PixelBuffer>, Affine),
}

impl PendingImage {
    pub fn baked(buffer: PixelBuffer) -> Self {
        Self::Baked(Arc::new(buffer))
    }

    pub fn pending(buffer: PixelBuffer, transform: Affine) -> Self {
        Self::Pending(Arc::new(buffer), transform)
    }

    pub fn buffer(&self) -> &Arc<PixelBuffer> {
        match self {
            Self::Baked(buffer) => buffer,
            Self::Pending(buffer, _) => buffer,
        }
    }

    pub fn transform(&self) -> Option<Affine> {
        match self {
            Self::Baked(_) => None,
            Self::Pending(_, t) => Some(*t),
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer().width
    }

    pub fn height(&self) -> u32 {
        self.buffer().height
    }

    /// Compose `transform` after any pending transform. O(1): the pixel
    /// buffer is shared, never copied.
    pub fn composed(&self, transform: Affine) -> Self {
        let combined = match self {
            Self::Baked(_) => transform,
            Self::Pending(_, existing) => affine::compose(transform, *existing),
        };
        Self::Pending(Arc::clone(self.buffer()), combined)
    }

    /// The same buffer with any pending transform discarded.
    pub fn cleared(&self) -> Self {
        Self::Baked(Arc::clone(self.buffer()))
    }
}
