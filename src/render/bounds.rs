use crate::foundation::core::{BoundingBox, Canvas};
use crate::fragment::mask::MaskFragment;

/// Smallest rectangle, clamped to `canvas`, covering every visible fragment placement.
///
/// Extents are folded unclipped and only the final box is clamped. Degenerate fragments and
/// fragments whose mask has no coverage are ignored. With nothing to fold the result is
/// [`BoundingBox::empty`].
pub fn compute_bounding_box(fragments: &[MaskFragment<'_>], canvas: Canvas) -> BoundingBox {
    let mut left = canvas.width_i32();
    let mut top = canvas.height_i32();
    let mut right = 0i32;
    let mut bottom = 0i32;

    for frag in fragments {
        if frag.is_degenerate() || !frag.has_coverage() {
            continue;
        }
        let (x1, y1, x2, y2) = frag.extent();
        left = left.min(x1);
        top = top.min(y1);
        right = right.max(x2);
        bottom = bottom.max(y2);
    }

    BoundingBox {
        left: left.max(0),
        top: top.max(0),
        right: right.min(canvas.width_i32()),
        bottom: bottom.min(canvas.height_i32()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/bounds.rs"]
mod tests;
