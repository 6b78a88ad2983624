use crate::foundation::core::Canvas;
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::render::extract::CroppedImage;

/// Full-canvas accumulation buffer of `0xAARRGGBB` pixels, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanvasBuffer {
    canvas: Canvas,
    pixels: Vec<u32>,
}

impl CanvasBuffer {
    /// Allocate a fully transparent buffer for `canvas`.
    ///
    /// Allocation failure is reported as [`CompositorError::Allocation`] instead of aborting.
    pub fn new_zeroed(canvas: Canvas) -> CompositorResult<Self> {
        let len = canvas.pixel_count()?;
        let pixels = try_alloc_zeroed(len)?;
        Ok(Self { canvas, pixels })
    }

    /// Canvas dimensions of this buffer.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Return `true` when every pixel is transparent black.
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|&px| px == 0)
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.canvas.width as usize + x as usize)
            .copied()
    }

    /// Row `y`, or `None` outside the canvas.
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.canvas.height {
            return None;
        }
        let w = self.canvas.width as usize;
        let start = y as usize * w;
        self.pixels.get(start..start + w)
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> Option<&mut [u32]> {
        if y >= self.canvas.height {
            return None;
        }
        let w = self.canvas.width as usize;
        let start = y as usize * w;
        self.pixels.get_mut(start..start + w)
    }

    /// Copy `image` back onto the canvas with its top-left corner at `(left, top)`.
    ///
    /// Inverse of extraction; pixels falling outside the canvas are dropped.
    pub fn place_region(&mut self, image: &CroppedImage, left: i32, top: i32) {
        let cw = self.canvas.width_i32();
        for (sy, src_row) in image.rows().enumerate() {
            let Some(y) = top.checked_add(sy as i32) else {
                break;
            };
            if y < 0 {
                continue;
            }
            let Some(dst_row) = self.row_mut(y as u32) else {
                break;
            };
            let x0 = left.max(0);
            let x1 = left.saturating_add(src_row.len() as i32).min(cw);
            if x1 <= x0 {
                continue;
            }
            let skip = (x0 - left) as usize;
            let n = (x1 - x0) as usize;
            dst_row[x0 as usize..x1 as usize].copy_from_slice(&src_row[skip..skip + n]);
        }
    }
}

pub(crate) fn try_alloc_zeroed(len: usize) -> CompositorResult<Vec<u32>> {
    let bytes = len.saturating_mul(std::mem::size_of::<u32>());
    let mut v: Vec<u32> = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| CompositorError::allocation(bytes))?;
    v.resize(len, 0);
    Ok(v)
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
