//! Rasterizer output: borrowed coverage-mask fragments and their owned JSON form.

/// Owned, serializable fragments for fixtures and timeline files.
pub mod dump;
/// Borrowed mask fragments as produced per render call.
pub mod mask;
