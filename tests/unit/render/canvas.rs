use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn new_buffer_is_transparent() {
    let b = CanvasBuffer::new_zeroed(canvas(3, 2)).unwrap();
    assert_eq!(b.pixels().len(), 6);
    assert!(b.is_clear());
    assert_eq!(b.pixel(2, 1), Some(0));
    assert_eq!(b.pixel(3, 0), None);
    assert_eq!(b.pixel(0, 2), None);
    assert!(b.row(2).is_none());
}

#[test]
fn clear_resets_pixels() {
    let mut b = CanvasBuffer::new_zeroed(canvas(2, 2)).unwrap();
    b.row_mut(1).unwrap()[0] = 0xFF00_00FF;
    assert!(!b.is_clear());
    b.clear();
    assert!(b.is_clear());
}

#[test]
fn place_region_writes_at_offset() {
    let mut b = CanvasBuffer::new_zeroed(canvas(4, 3)).unwrap();
    let img = CroppedImage {
        width: 2,
        height: 2,
        pixels: vec![1, 2, 3, 4],
    };
    b.place_region(&img, 1, 1);
    assert_eq!(b.row(0).unwrap(), &[0, 0, 0, 0]);
    assert_eq!(b.row(1).unwrap(), &[0, 1, 2, 0]);
    assert_eq!(b.row(2).unwrap(), &[0, 3, 4, 0]);
}

#[test]
fn place_region_clips_outside_canvas() {
    let mut b = CanvasBuffer::new_zeroed(canvas(2, 2)).unwrap();
    let img = CroppedImage {
        width: 3,
        height: 3,
        pixels: (1..=9).collect(),
    };
    b.place_region(&img, -1, -1);
    assert_eq!(b.pixels(), &[5, 6, 8, 9]);
}
