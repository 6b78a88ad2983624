use super::*;
use crate::foundation::error::CompositorError;
use crate::render::extract::{CroppedImage, HeapAllocator};
use crate::render::scratch::ScratchPoolOpts;

struct FailingAllocator;

impl SurfaceAllocator for FailingAllocator {
    type Surface = CroppedImage;

    fn allocate(&mut self, width: u32, height: u32) -> CompositorResult<CroppedImage> {
        Err(CompositorError::allocation(width as usize * height as usize * 4))
    }
}

fn frag(bitmap: &[u8], w: i32, h: i32, x: i32, y: i32) -> MaskFragment<'_> {
    MaskFragment {
        width: w,
        height: h,
        stride: w,
        bitmap,
        color: 0x0000_0000,
        dst_x: x,
        dst_y: y,
    }
}

#[test]
fn renders_cropped_region() {
    let bm = [255u8; 4];
    let frags = [frag(&bm, 2, 2, 1, 2)];
    let mut pool = ScratchPool::new(ScratchPoolOpts::default());
    let out = render_fragments(&frags, Canvas::new(5, 5).unwrap(), &mut pool, &mut HeapAllocator)
        .unwrap()
        .unwrap();
    assert_eq!(out.rect.to_array(), [1, 2, 3, 4]);
    assert_eq!(out.surface.pixels, vec![0xFF00_0000; 4]);
    assert_eq!(pool.stats().retained_buffers, 1);
}

#[test]
fn nothing_visible_yields_none_without_allocating() {
    let zeros = [0u8; 4];
    let frags = [frag(&zeros, 2, 2, 0, 0)];
    let mut pool = ScratchPool::new(ScratchPoolOpts::default());
    let out = render_fragments(&frags, Canvas::new(4, 4).unwrap(), &mut pool, &mut HeapAllocator)
        .unwrap();
    assert!(out.is_none());
    assert_eq!(pool.stats().alloc_buffers, 0);
}

#[test]
fn allocation_failure_fails_cleanly_and_returns_scratch() {
    let bm = [255u8; 4];
    let frags = [frag(&bm, 2, 2, 0, 0)];
    let mut pool = ScratchPool::new(ScratchPoolOpts::default());
    let err = render_fragments(
        &frags,
        Canvas::new(4, 4).unwrap(),
        &mut pool,
        &mut FailingAllocator,
    )
    .unwrap_err();
    assert!(matches!(err, CompositorError::Allocation { bytes: 16 }));
    assert_eq!(pool.stats().retained_buffers, 1);
}

#[test]
fn partially_visible_fragment_is_cropped_to_canvas() {
    let bm = [255u8; 9];
    let frags = [frag(&bm, 3, 3, -1, -1)];
    let mut pool = ScratchPool::new(ScratchPoolOpts::default());
    let out = render_fragments(&frags, Canvas::new(4, 4).unwrap(), &mut pool, &mut HeapAllocator)
        .unwrap()
        .unwrap();
    assert_eq!(out.rect.to_array(), [0, 0, 2, 2]);
    assert_eq!((out.surface.width, out.surface.height), (2, 2));
}
