use super::*;
use crate::foundation::core::Canvas;

fn numbered_canvas(w: u32, h: u32) -> CanvasBuffer {
    let mut b = CanvasBuffer::new_zeroed(Canvas::new(w, h).unwrap()).unwrap();
    for y in 0..h {
        for (x, px) in b.row_mut(y).unwrap().iter_mut().enumerate() {
            *px = y * 100 + x as u32;
        }
    }
    b
}

/// Surface with padded rows, like a platform bitmap.
struct PaddedSurface {
    w: u32,
    h: u32,
    stride: usize,
    pixels: Vec<u32>,
}

impl TargetSurface for PaddedSurface {
    fn size(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    fn stride(&self) -> usize {
        self.stride
    }

    fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }
}

#[test]
fn extract_copies_sub_rectangle() {
    let c = numbered_canvas(4, 4);
    let img = extract_region(&c, BoundingBox::new(1, 2, 3, 4))
        .unwrap()
        .unwrap();
    assert_eq!((img.width, img.height), (2, 2));
    assert_eq!(img.pixels, vec![201, 202, 301, 302]);
}

#[test]
fn extract_does_not_mutate_canvas() {
    let c = numbered_canvas(3, 3);
    let before = c.clone();
    let _ = extract_region(&c, BoundingBox::new(0, 0, 3, 3)).unwrap();
    assert_eq!(c, before);
}

#[test]
fn empty_rect_yields_none() {
    let c = numbered_canvas(3, 3);
    assert!(
        extract_region(&c, BoundingBox::empty(c.canvas()))
            .unwrap()
            .is_none()
    );
    assert!(
        extract_region(&c, BoundingBox::new(1, 1, 1, 2))
            .unwrap()
            .is_none()
    );
}

#[test]
fn rect_outside_canvas_is_rejected() {
    let c = numbered_canvas(3, 3);
    assert!(extract_region(&c, BoundingBox::new(-1, 0, 2, 2)).is_err());
    assert!(extract_region(&c, BoundingBox::new(0, 0, 4, 2)).is_err());
}

#[test]
fn extract_into_honors_target_stride() {
    let c = numbered_canvas(4, 3);
    let mut s = PaddedSurface {
        w: 2,
        h: 2,
        stride: 3,
        pixels: vec![7; 6],
    };
    extract_into(&c, BoundingBox::new(2, 1, 4, 3), &mut s).unwrap();
    assert_eq!(s.pixels, vec![102, 103, 7, 202, 203, 7]);
}

#[test]
fn extract_into_rejects_wrong_size() {
    let c = numbered_canvas(4, 3);
    let mut s = CroppedImage::new_zeroed(3, 2).unwrap();
    assert!(extract_into(&c, BoundingBox::new(0, 0, 2, 2), &mut s).is_err());
}

#[test]
fn heap_allocator_produces_transparent_images() {
    let img = HeapAllocator.allocate(3, 2).unwrap();
    assert_eq!(img.size(), (3, 2));
    assert_eq!(img.stride(), 3);
    assert!(img.pixels.iter().all(|&p| p == 0));
    assert_eq!(img.rows().count(), 2);
}

#[test]
fn rgba_export_reorders_channels() {
    let img = CroppedImage {
        width: 1,
        height: 1,
        pixels: vec![0x80FF_1020],
    };
    assert_eq!(img.to_rgba8(), vec![0xFF, 0x10, 0x20, 0x80]);
    assert_eq!(img.pixel(0, 0), Some(0x80FF_1020));
    assert_eq!(img.pixel(1, 0), None);
}
