//! Session-level rendering: the rasterizer seam and the disposable per-session context.

/// Per-session render context.
pub mod context;
/// Fragment list fingerprints for change detection.
pub mod fingerprint;
/// Rasterizer trait and per-frame output.
pub mod source;
/// JSON-backed fragment timelines.
pub mod timeline;
