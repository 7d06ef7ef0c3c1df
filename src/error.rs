/// Convenience result type used across latebake.
pub type LatebakeResult<T> = Result<T, LatebakeError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Recoverable conditions are deliberately absent: a degenerate transform
/// inverts to identity and an oversized bake target is skipped with a
/// warning, neither is an error.
#[derive(thiserror::Error, Debug)]
pub enum LatebakeError {
    /// Invalid caller-provided buffers or dimensions.
    #[error("validation error: {0}")]
    Validation(String),

    /// A node path needed texture upload/download with no usable GPU context.
    #[error("gpu error: {0}")]
    Gpu(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LatebakeError {
    /// Build a [`LatebakeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LatebakeError::Gpu`] value.
    pub fn gpu(msg: impl Into<String>) -> Self {
        Self::Gpu(msg.into())
    }
}
