use crate::foundation::core::Canvas;
use crate::foundation::error::CompositorResult;
use crate::render::canvas::CanvasBuffer;
use std::collections::HashMap;

/// Pool configuration for cached accumulation buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScratchPoolOpts {
    /// Maximum bytes retained across all canvas sizes. `0` disables pooling.
    pub max_pool_bytes: usize,
    /// Maximum number of retained buffers per canvas size.
    pub max_buffers_per_size: usize,
}

impl Default for ScratchPoolOpts {
    fn default() -> Self {
        Self {
            // One 4K ARGB canvas.
            max_pool_bytes: 3840 * 2160 * 4,
            max_buffers_per_size: 1,
        }
    }
}

/// Counters describing pool behavior.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScratchPoolStats {
    /// Buffers currently retained.
    pub retained_buffers: usize,
    /// Bytes currently retained.
    pub retained_bytes: usize,
    /// Buffers allocated because no retained one matched.
    pub alloc_buffers: u64,
    /// Bytes allocated because no retained one matched.
    pub alloc_bytes: u64,
    /// Borrows served from the pool.
    pub reused_buffers: u64,
    /// Buffers dropped on release because a cap was hit.
    pub dropped_on_release: u64,
}

fn byte_len(canvas: Canvas) -> usize {
    (canvas.width as usize)
        .saturating_mul(canvas.height as usize)
        .saturating_mul(4)
}

/// Bounded pool of full-canvas accumulation buffers, keyed by canvas size.
///
/// Borrowed buffers are always transparent. Borrow/release happen once per render call.
pub struct ScratchPool {
    opts: ScratchPoolOpts,
    stats: ScratchPoolStats,
    buckets: HashMap<Canvas, Vec<CanvasBuffer>>,
}

impl ScratchPool {
    /// Create an empty pool.
    pub fn new(opts: ScratchPoolOpts) -> Self {
        Self {
            opts,
            stats: ScratchPoolStats::default(),
            buckets: HashMap::new(),
        }
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> ScratchPoolStats {
        self.stats.clone()
    }

    /// Take a transparent buffer for `canvas`, allocating if none is retained.
    pub fn borrow(&mut self, canvas: Canvas) -> CompositorResult<CanvasBuffer> {
        if let Some(mut buf) = self.buckets.get_mut(&canvas).and_then(Vec::pop) {
            self.stats.retained_buffers = self.stats.retained_buffers.saturating_sub(1);
            self.stats.retained_bytes = self.stats.retained_bytes.saturating_sub(byte_len(canvas));
            self.stats.reused_buffers = self.stats.reused_buffers.saturating_add(1);
            buf.clear();
            return Ok(buf);
        }

        let buf = CanvasBuffer::new_zeroed(canvas)?;
        self.stats.alloc_buffers = self.stats.alloc_buffers.saturating_add(1);
        self.stats.alloc_bytes = self
            .stats
            .alloc_bytes
            .saturating_add(byte_len(canvas) as u64);
        Ok(buf)
    }

    /// Return a buffer to the pool, or drop it when a cap is hit.
    pub fn release(&mut self, buf: CanvasBuffer) {
        let canvas = buf.canvas();
        let bytes = byte_len(canvas);
        if self.opts.max_pool_bytes == 0
            || self.opts.max_buffers_per_size == 0
            || self.stats.retained_bytes.saturating_add(bytes) > self.opts.max_pool_bytes
        {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let bucket = self.buckets.entry(canvas).or_default();
        if bucket.len() >= self.opts.max_buffers_per_size {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        bucket.push(buf);
        self.stats.retained_buffers = self.stats.retained_buffers.saturating_add(1);
        self.stats.retained_bytes = self.stats.retained_bytes.saturating_add(bytes);
    }

    /// Drop every retained buffer, e.g. after the frame size changes.
    pub fn purge(&mut self) {
        self.buckets.clear();
        self.stats.retained_buffers = 0;
        self.stats.retained_bytes = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scratch.rs"]
mod tests;
