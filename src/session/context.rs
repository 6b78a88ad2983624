use crate::foundation::core::Canvas;
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::render::extract::SurfaceAllocator;
use crate::render::pipeline::{RenderedFrame, render_fragments};
use crate::render::scratch::{ScratchPool, ScratchPoolOpts, ScratchPoolStats};
use crate::session::fingerprint::{FragmentFingerprint, fingerprint_fragments};
use crate::session::source::{FragmentSource, FrameChange};

/// Options for a [`RenderContext`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderContextOpts {
    /// Report [`FrameOutput::Unchanged`] instead of recompositing when the source says nothing
    /// changed (or, for sources that do not track changes, when the fragment list fingerprint
    /// matches the previous call).
    pub reuse_unchanged: bool,
    /// Scratch pool limits.
    pub scratch: ScratchPoolOpts,
}

/// Result of [`RenderContext::render_frame`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameOutput<S> {
    /// Freshly composited and cropped subtitle image.
    Rendered(RenderedFrame<S>),
    /// Same image as the previous `Rendered` output; the caller keeps showing it.
    Unchanged,
    /// Nothing to display.
    Empty,
}

impl<S> FrameOutput<S> {
    /// The rendered frame, if this output carries one.
    pub fn into_rendered(self) -> Option<RenderedFrame<S>> {
        match self {
            Self::Rendered(f) => Some(f),
            Self::Unchanged | Self::Empty => None,
        }
    }

    /// Return `true` for [`FrameOutput::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Per-context counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// `render_frame` calls that reached the source.
    pub frames_requested: u64,
    /// Frames composited into a surface.
    pub frames_rendered: u64,
    /// Frames with nothing visible.
    pub frames_empty: u64,
    /// Frames answered from the previous output.
    pub frames_reused: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LastOutput {
    Rendered,
    Empty,
}

/// One subtitle rendering session: a fragment source, a host allocator, the configured frame
/// size, and reusable scratch memory.
///
/// Dropping the context (or calling [`RenderContext::into_parts`]) releases everything it
/// owns; nothing is shared between contexts.
pub struct RenderContext<S: FragmentSource, A: SurfaceAllocator> {
    source: S,
    allocator: A,
    opts: RenderContextOpts,
    canvas: Option<Canvas>,
    pool: ScratchPool,
    stats: RenderStats,
    last_output: Option<LastOutput>,
    last_fingerprint: Option<FragmentFingerprint>,
}

impl<S: FragmentSource, A: SurfaceAllocator> RenderContext<S, A> {
    /// Create a context with no frame size configured.
    pub fn new(source: S, allocator: A, opts: RenderContextOpts) -> Self {
        let pool = ScratchPool::new(opts.scratch);
        Self {
            source,
            allocator,
            opts,
            canvas: None,
            pool,
            stats: RenderStats::default(),
            last_output: None,
            last_fingerprint: None,
        }
    }

    /// Configure the output frame size and forward it to the source.
    ///
    /// Invalidates previous output and releases scratch buffers of the old size.
    pub fn set_frame_size(&mut self, width: u32, height: u32) -> CompositorResult<()> {
        let canvas = Canvas::new(width, height)?;
        self.source.set_frame_size(canvas)?;
        if self.canvas != Some(canvas) {
            self.pool.purge();
        }
        self.canvas = Some(canvas);
        self.invalidate();
        tracing::info!(width, height, "frame size set");
        Ok(())
    }

    /// Configured frame size, if any.
    pub fn frame_size(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Counters since creation.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Scratch pool counters.
    pub fn scratch_stats(&self) -> ScratchPoolStats {
        self.pool.stats()
    }

    /// Shared access to the source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the source, e.g. to load a different track.
    ///
    /// Previous output is invalidated since the source may now produce different fragments.
    pub fn source_mut(&mut self) -> &mut S {
        self.invalidate();
        &mut self.source
    }

    /// Tear the context down, returning the source and allocator.
    pub fn into_parts(self) -> (S, A) {
        (self.source, self.allocator)
    }

    /// Render the subtitle frame at `time_ms`, cropped to its visible content.
    ///
    /// Fails with a validation error before a frame size is configured. Any error leaves the
    /// context ready for the next call.
    #[tracing::instrument(skip(self))]
    pub fn render_frame(&mut self, time_ms: i64) -> CompositorResult<FrameOutput<A::Surface>> {
        let canvas = self
            .canvas
            .ok_or_else(|| CompositorError::validation("frame size is not configured"))?;
        self.stats.frames_requested = self.stats.frames_requested.saturating_add(1);

        let frame = match self.source.render(time_ms) {
            Ok(f) => f,
            Err(e) => {
                self.last_output = None;
                self.last_fingerprint = None;
                return Err(e);
            }
        };

        let fingerprint = match frame.change {
            FrameChange::Unknown => Some(fingerprint_fragments(&frame.fragments)),
            _ => None,
        };
        let unchanged = match frame.change {
            FrameChange::Unchanged => true,
            FrameChange::Unknown => fingerprint.is_some() && fingerprint == self.last_fingerprint,
            FrameChange::Moved | FrameChange::Changed => false,
        };

        if self.opts.reuse_unchanged
            && unchanged
            && let Some(last) = self.last_output
        {
            self.stats.frames_reused = self.stats.frames_reused.saturating_add(1);
            tracing::trace!("reusing previous output");
            self.last_fingerprint = fingerprint;
            return Ok(match last {
                LastOutput::Rendered => FrameOutput::Unchanged,
                LastOutput::Empty => FrameOutput::Empty,
            });
        }

        let result = render_fragments(
            &frame.fragments,
            canvas,
            &mut self.pool,
            &mut self.allocator,
        );
        match result {
            Ok(Some(rendered)) => {
                self.stats.frames_rendered = self.stats.frames_rendered.saturating_add(1);
                self.last_output = Some(LastOutput::Rendered);
                self.last_fingerprint = fingerprint;
                Ok(FrameOutput::Rendered(rendered))
            }
            Ok(None) => {
                self.stats.frames_empty = self.stats.frames_empty.saturating_add(1);
                self.last_output = Some(LastOutput::Empty);
                self.last_fingerprint = fingerprint;
                Ok(FrameOutput::Empty)
            }
            Err(e) => {
                tracing::warn!(error = %e, time_ms, "subtitle frame render failed");
                self.last_output = None;
                self.last_fingerprint = None;
                Err(e)
            }
        }
    }

    /// Ask the source whether the frame at `time_ms` differs from the previous one.
    ///
    /// Like the underlying rasterizer, this advances the source's change tracking.
    pub fn has_change(&mut self, time_ms: i64) -> CompositorResult<bool> {
        let frame = self.source.render(time_ms)?;
        let changed = match frame.change {
            FrameChange::Unknown => {
                let fp = fingerprint_fragments(&frame.fragments);
                let changed = self.last_fingerprint != Some(fp);
                self.last_fingerprint = Some(fp);
                changed
            }
            other => other.is_changed(),
        };
        if changed {
            self.last_output = None;
        }
        Ok(changed)
    }

    fn invalidate(&mut self) {
        self.last_output = None;
        self.last_fingerprint = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/context.rs"]
mod tests;
