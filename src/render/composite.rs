use crate::foundation::core::{Canvas, TintColor, pack_argb, unpack_argb};
use crate::foundation::error::CompositorResult;
use crate::fragment::mask::MaskFragment;
use crate::render::canvas::CanvasBuffer;

/// Source alpha of one mask pixel: `coverage * opacity / 255`, truncating.
#[inline]
pub fn effective_alpha(coverage: u8, opacity: u8) -> u8 {
    (u32::from(coverage) * u32::from(opacity) / 255) as u8
}

/// Blend `tint` at `src_alpha` over the `0xAARRGGBB` pixel `dst` (source-over).
///
/// Integer-only with truncating division at every step. The stored color is the
/// alpha-weighted average of source and destination, not premultiplied. Channels are
/// narrowed to 8 bits by truncation, matching the reference output bit for bit.
#[inline]
pub fn source_over(dst: u32, tint: TintColor, src_alpha: u8) -> u32 {
    let sa = u32::from(src_alpha);
    let [da, dr, dg, db] = unpack_argb(dst).map(u32::from);
    let inv = 255 - sa;

    let out_a = (sa + da * inv / 255) as u8;
    if out_a == 0 {
        return 0;
    }

    let oa = u32::from(out_a);
    let mix = |sc: u8, dc: u32| ((u32::from(sc) * sa + dc * da * inv / 255) / oa) as u8;
    pack_argb(out_a, mix(tint.r, dr), mix(tint.g, dg), mix(tint.b, db))
}

/// Blend one fragment onto `canvas`, clipping rows and columns to the canvas.
pub fn blend_fragment(canvas: &mut CanvasBuffer, frag: &MaskFragment<'_>) {
    if frag.is_degenerate() {
        return;
    }
    let tint = frag.tint();
    let opacity = tint.opacity();
    if opacity == 0 {
        return;
    }

    let cw = canvas.canvas().width_i32();
    let ch = canvas.canvas().height_i32();

    // Visible column window in fragment space.
    let x_start = frag.dst_x.saturating_neg().max(0);
    let x_end = cw.saturating_sub(frag.dst_x).min(frag.width);
    if x_end <= x_start {
        return;
    }

    for (y, src_row) in frag.rows() {
        let cy = frag.dst_y.saturating_add(y);
        if cy < 0 {
            continue;
        }
        if cy >= ch {
            break;
        }
        let Some(dst_row) = canvas.row_mut(cy as u32) else {
            break;
        };

        let src = &src_row[x_start as usize..x_end as usize];
        let dst_off = (frag.dst_x + x_start) as usize;
        let dst = &mut dst_row[dst_off..dst_off + src.len()];

        for (d, &coverage) in dst.iter_mut().zip(src) {
            if coverage == 0 {
                continue;
            }
            let sa = effective_alpha(coverage, opacity);
            if sa == 0 {
                continue;
            }
            *d = source_over(*d, tint, sa);
        }
    }
}

/// Blend `fragments` onto `canvas` in sequence order; later fragments land on top.
pub fn composite_into(canvas: &mut CanvasBuffer, fragments: &[MaskFragment<'_>]) {
    for frag in fragments {
        blend_fragment(canvas, frag);
    }
}

/// Composite `fragments` onto a freshly allocated transparent canvas.
#[tracing::instrument(skip(fragments), fields(n_fragments = fragments.len()))]
pub fn composite_fragments(
    fragments: &[MaskFragment<'_>],
    canvas: Canvas,
) -> CompositorResult<CanvasBuffer> {
    let mut buf = CanvasBuffer::new_zeroed(canvas)?;
    composite_into(&mut buf, fragments);
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
