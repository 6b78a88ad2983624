//! subcomp composites subtitle coverage masks into cropped ARGB images.
//!
//! A subtitle rasterizer (libass or similar) emits, per video frame, a list of positioned 8-bit
//! coverage masks, each tinted with one packed color. subcomp turns that list into a single
//! `0xAARRGGBB` image cropped to the region that actually has content, once per displayed
//! frame.
//!
//! # Pipeline overview
//!
//! 1. **Bound**: `fragments -> BoundingBox` ([`compute_bounding_box`]), the tightest canvas
//!    rectangle covering every visible fragment. Empty means "skip this frame".
//! 2. **Composite**: `fragments -> CanvasBuffer` ([`composite_fragments`]), source-over
//!    blending in sequence order with integer-only arithmetic.
//! 3. **Extract**: `CanvasBuffer + BoundingBox -> surface` ([`extract_region`],
//!    [`extract_into`]), a strided row copy into a host-provided surface.
//!
//! [`render_fragments`] chains the three stages for one call, and [`RenderContext`] wraps them
//! in a per-session object that owns the rasterizer seam ([`FragmentSource`]), the configured
//! frame size, and reusable scratch memory.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate. Fragment geometry is untrusted and every
//!   pixel access is bounds-checked or clipped.
//! - **Bit-exact blending**: all per-pixel math uses truncating integer division so output matches
//!   the reference renderer byte for byte.
//! - **Inverted tint alpha**: the low byte of a fragment color is `255 - opacity`; it is converted
//!   in exactly one place, [`TintColor::opacity`].
//! - **No IO in the core**: only the CLI and [`FragmentTimeline`] touch the filesystem.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Rasterizer output types.
pub mod fragment;
/// Compositing stages.
pub mod render;
/// Session-level context and rasterizer seam.
pub mod session;

pub use foundation::core::{
    BoundingBox, Canvas, TintColor, argb_to_rgba8, pack_argb, unpack_argb,
};
pub use foundation::error::{CompositorError, CompositorResult};
pub use fragment::dump::{FragmentDump, PackedColor};
pub use fragment::mask::MaskFragment;
pub use render::bounds::compute_bounding_box;
pub use render::canvas::CanvasBuffer;
pub use render::composite::{
    blend_fragment, composite_fragments, composite_into, effective_alpha, source_over,
};
pub use render::extract::{
    CroppedImage, HeapAllocator, SurfaceAllocator, TargetSurface, extract_into, extract_region,
};
pub use render::pipeline::{RenderedFrame, render_fragments};
pub use render::scratch::{ScratchPool, ScratchPoolOpts, ScratchPoolStats};
pub use session::context::{FrameOutput, RenderContext, RenderContextOpts, RenderStats};
pub use session::fingerprint::{FragmentFingerprint, fingerprint_fragments};
pub use session::source::{FragmentSource, FrameChange, SourceFrame};
pub use session::timeline::{FragmentTimeline, TimelineEvent, TimelineSource};
