/// Convenience result type used across subcomp.
pub type CompositorResult<T> = Result<T, CompositorError>;

/// Top-level error taxonomy used by compositor APIs.
///
/// "Nothing to render" is not an error: operations that can produce no output return
/// `Ok(None)` instead.
#[derive(thiserror::Error, Debug)]
pub enum CompositorError {
    /// Invalid caller-provided geometry, buffers, or fixture data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scratch or output buffer could not be allocated.
    #[error("allocation error: failed to allocate {bytes} bytes")]
    Allocation {
        /// Size of the failed request.
        bytes: usize,
    },

    /// The fragment source (rasterizer) failed to produce a frame.
    #[error("source error: {0}")]
    Source(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CompositorError {
    /// Build a [`CompositorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CompositorError::Allocation`] value.
    pub fn allocation(bytes: usize) -> Self {
        Self::Allocation { bytes }
    }

    /// Build a [`CompositorError::Source`] value.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`CompositorError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
