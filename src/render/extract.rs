use crate::foundation::core::{BoundingBox, argb_to_rgba8};
use crate::foundation::error::{CompositorError, CompositorResult};
use crate::render::canvas::{CanvasBuffer, try_alloc_zeroed};

/// A writable `0xAARRGGBB` pixel buffer handed out by the host.
///
/// Rows start every `stride()` pixels; `stride() >= size().0`.
pub trait TargetSurface {
    /// `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Distance between row starts, in pixels.
    fn stride(&self) -> usize;

    /// Backing pixels, at least `stride * (height - 1) + width` long.
    fn pixels_mut(&mut self) -> &mut [u32];
}

/// Host-side producer of output surfaces (a platform bitmap API, or plain heap memory).
pub trait SurfaceAllocator {
    /// Surface type produced by this allocator.
    type Surface: TargetSurface;

    /// Allocate a surface of exactly `width × height` pixels.
    fn allocate(&mut self, width: u32, height: u32) -> CompositorResult<Self::Surface>;
}

/// Tightly packed cropped output image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CroppedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `0xAARRGGBB` pixels, row-major, no padding.
    pub pixels: Vec<u32>,
}

impl CroppedImage {
    /// Allocate a transparent image.
    pub fn new_zeroed(width: u32, height: u32) -> CompositorResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| CompositorError::validation("cropped image size overflow"))?;
        Ok(Self {
            width,
            height,
            pixels: try_alloc_zeroed(len)?,
        })
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Straight-alpha RGBA8 bytes, ready for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        argb_to_rgba8(&self.pixels)
    }
}

impl TargetSurface for CroppedImage {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn stride(&self) -> usize {
        self.width as usize
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }
}

/// [`SurfaceAllocator`] producing heap-backed [`CroppedImage`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl SurfaceAllocator for HeapAllocator {
    type Surface = CroppedImage;

    fn allocate(&mut self, width: u32, height: u32) -> CompositorResult<CroppedImage> {
        CroppedImage::new_zeroed(width, height)
    }
}

/// Copy the `rect` sub-region of `canvas` into `surface`, row by row.
///
/// `rect` must be non-empty and inside the canvas, and `surface` must be exactly
/// `rect.width() × rect.height()`. The canvas is not modified.
pub fn extract_into<T: TargetSurface + ?Sized>(
    canvas: &CanvasBuffer,
    rect: BoundingBox,
    surface: &mut T,
) -> CompositorResult<()> {
    if rect.is_empty() || !rect.within(canvas.canvas()) {
        return Err(CompositorError::validation(format!(
            "extract rect {:?} is empty or outside the {}x{} canvas",
            rect.to_array(),
            canvas.width(),
            canvas.height()
        )));
    }
    let (w, h) = (rect.width(), rect.height());
    if surface.size() != (w, h) {
        return Err(CompositorError::validation(format!(
            "target surface is {:?}, expected {w}x{h}",
            surface.size()
        )));
    }
    let stride = surface.stride();
    if stride < w as usize {
        return Err(CompositorError::validation(
            "target surface stride is smaller than its width",
        ));
    }

    let left = rect.left as usize;
    let dst = surface.pixels_mut();
    for y in 0..h {
        let src_row = canvas
            .row(rect.top as u32 + y)
            .ok_or_else(|| CompositorError::validation("extract row outside canvas"))?;
        let start = y as usize * stride;
        let dst_row = dst
            .get_mut(start..start + w as usize)
            .ok_or_else(|| CompositorError::validation("target surface buffer too short"))?;
        dst_row.copy_from_slice(&src_row[left..left + w as usize]);
    }
    Ok(())
}

/// Copy the `rect` sub-region of `canvas` into a new tightly sized image.
///
/// Returns `Ok(None)` when `rect` is empty.
pub fn extract_region(
    canvas: &CanvasBuffer,
    rect: BoundingBox,
) -> CompositorResult<Option<CroppedImage>> {
    if rect.is_empty() {
        return Ok(None);
    }
    let mut out = CroppedImage::new_zeroed(rect.width(), rect.height())?;
    extract_into(canvas, rect, &mut out)?;
    Ok(Some(out))
}

#[cfg(test)]
#[path = "../../tests/unit/render/extract.rs"]
mod tests;
