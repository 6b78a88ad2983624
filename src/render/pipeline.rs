use crate::foundation::core::{BoundingBox, Canvas};
use crate::foundation::error::CompositorResult;
use crate::fragment::mask::MaskFragment;
use crate::render::bounds::compute_bounding_box;
use crate::render::composite::composite_into;
use crate::render::extract::{SurfaceAllocator, extract_into};
use crate::render::scratch::ScratchPool;

/// Cropped output of one render call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFrame<S> {
    /// Placement of `surface` on the canvas.
    pub rect: BoundingBox,
    /// Cropped pixels, `rect.width() × rect.height()`.
    pub surface: S,
}

/// Composite `fragments` and crop the result to their bounding box.
///
/// Returns `Ok(None)` when there is nothing visible. On error no surface is returned and the
/// scratch buffer goes back to `pool`.
#[tracing::instrument(skip(fragments, pool, allocator), fields(n_fragments = fragments.len()))]
pub fn render_fragments<A: SurfaceAllocator>(
    fragments: &[MaskFragment<'_>],
    canvas: Canvas,
    pool: &mut ScratchPool,
    allocator: &mut A,
) -> CompositorResult<Option<RenderedFrame<A::Surface>>> {
    let rect = compute_bounding_box(fragments, canvas);
    if rect.is_empty() {
        tracing::trace!("no visible fragments");
        return Ok(None);
    }

    let mut scratch = pool.borrow(canvas)?;
    composite_into(&mut scratch, fragments);

    let out = allocator
        .allocate(rect.width(), rect.height())
        .and_then(|mut surface| {
            extract_into(&scratch, rect, &mut surface)?;
            Ok(surface)
        });
    pool.release(scratch);

    let surface = out?;
    tracing::debug!(rect = ?rect.to_array(), "rendered subtitle region");
    Ok(Some(RenderedFrame { rect, surface }))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
