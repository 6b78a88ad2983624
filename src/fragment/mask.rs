use crate::foundation::core::TintColor;

/// One positioned 8-bit coverage mask emitted by the subtitle rasterizer.
///
/// Fragments borrow their bitmap and are only valid for the render call that produced
/// them. Geometry is not trusted: non-positive sizes mark a degenerate fragment, offsets may
/// lie outside the canvas, and rows that the bitmap is too short to hold are treated as
/// absent.
#[derive(Clone, Copy, Debug)]
pub struct MaskFragment<'a> {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
    /// Row length of `bitmap` in bytes (may exceed `width`).
    pub stride: i32,
    /// Coverage bytes, row-major, `stride` bytes per row. `0` is transparent, `255` opaque.
    pub bitmap: &'a [u8],
    /// Packed `0xRRGGBBAA` tint with inverted alpha in the low byte.
    pub color: u32,
    /// Canvas column of the top-left corner.
    pub dst_x: i32,
    /// Canvas row of the top-left corner.
    pub dst_y: i32,
}

impl<'a> MaskFragment<'a> {
    /// Return `true` when the fragment has a non-positive width or height.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Decoded tint of the fragment.
    pub fn tint(&self) -> TintColor {
        TintColor::from_packed(self.color)
    }

    /// Raw placed extent `(x1, y1, x2, y2)`, not clipped to any canvas.
    pub fn extent(&self) -> (i32, i32, i32, i32) {
        (
            self.dst_x,
            self.dst_y,
            self.dst_x.saturating_add(self.width),
            self.dst_y.saturating_add(self.height),
        )
    }

    /// The `width` coverage bytes of row `y`.
    ///
    /// Returns `None` for rows outside `[0, height)` and for rows the bitmap cannot hold.
    pub fn row(&self, y: i32) -> Option<&'a [u8]> {
        if self.is_degenerate() || y < 0 || y >= self.height || self.stride < self.width {
            return None;
        }
        let start = (y as usize).checked_mul(self.stride as usize)?;
        let end = start.checked_add(self.width as usize)?;
        self.bitmap.get(start..end)
    }

    /// Rows `0..height` paired with their coverage bytes, stopping at the first missing row.
    pub fn rows(&self) -> impl Iterator<Item = (i32, &'a [u8])> {
        let this = *self;
        let height = if this.is_degenerate() { 0 } else { this.height };
        (0..height).map_while(move |y| this.row(y).map(|r| (y, r)))
    }

    /// Return `true` when any coverage byte inside the `width × height` window is non-zero.
    pub fn has_coverage(&self) -> bool {
        self.rows().any(|(_, row)| row.iter().any(|&c| c != 0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fragment/mask.rs"]
mod tests;
