//! Float-buffer to display conversion.
//!
//! The cache here is deliberately not global: each owner constructs its own
//! instance and keys entries by a token it controls, so tests and parallel
//! node evaluation never share hidden state.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::PixelBuffer;
use crate::math::Fnv1a64;

/// Identity token for cache entries. The caller decides what it means: a
/// node id, a revision counter, or [`content_token`] output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentToken(pub u64);

/// Hash a buffer's dimensions and pixel bit patterns into a token, for
/// callers that want content addressing rather than identity addressing.
pub fn content_token(buffer: &PixelBuffer) -> ContentToken {
    let mut h = Fnv1a64::new_default();
    h.write_u32(buffer.width);
    h.write_u32(buffer.height);
    for &v in &buffer.data {
        h.write_f32_bits(v);
    }
    ContentToken(h.finish())
}

/// Convert `[0,1]` float RGBA to display RGBA8, clamped and rounded.
pub fn to_display_rgba8(buffer: &PixelBuffer) -> Vec<u8> {
    buffer
        .data
        .iter()
        .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

/// Conversion cache keyed by caller-controlled tokens.
#[derive(Debug, Default)]
pub struct DisplayCache {
    entries: HashMap<ContentToken, Arc<Vec<u8>>>,
}

impl DisplayCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached conversion for `token`, converting `buffer` on a miss.
    pub fn get_or_convert(&mut self, token: ContentToken, buffer: &PixelBuffer) -> Arc<Vec<u8>> {
        Arc::clone(
            self.entries
                .entry(token)
                .or_insert_with(|| Arc::new(to_display_rgba8(buffer))),
        )
    }

    pub fn invalidate(&mut self, token: ContentToken) {
        self.entries.remove(&token);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
