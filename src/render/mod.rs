//! CPU compositing of mask fragments.
//!
//! The stages run in order: [`bounds`] reduces the fragment list to a bounding box,
//! [`composite`] blends every fragment into a full-canvas [`canvas::CanvasBuffer`], and
//! [`extract`] copies the bounding box out into a host surface. [`pipeline`] chains them.

/// Bounding-box reduction over a fragment list.
pub mod bounds;
/// Full-canvas accumulation buffer.
pub mod canvas;
/// Per-pixel source-over blending.
pub mod composite;
/// Cropped extraction and host surface traits.
pub mod extract;
/// One-call render chain.
pub mod pipeline;
/// Reusable accumulation buffers.
pub mod scratch;
