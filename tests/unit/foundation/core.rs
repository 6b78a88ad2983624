use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(u32::MAX, 1).is_err());
    let c = Canvas::new(1920, 1080).unwrap();
    assert_eq!(c.pixel_count().unwrap(), 1920 * 1080);
}

#[test]
fn empty_box_is_canonical_and_empty() {
    let c = Canvas::new(4, 3).unwrap();
    let e = BoundingBox::empty(c);
    assert_eq!(e.to_array(), [4, 3, 0, 0]);
    assert!(e.is_empty());
    assert_eq!(e.width(), 0);
    assert_eq!(e.height(), 0);
}

#[test]
fn box_dimensions_and_containment() {
    let b = BoundingBox::new(1, 2, 4, 5);
    assert!(!b.is_empty());
    assert_eq!((b.width(), b.height()), (3, 3));
    assert!(b.contains(1, 2));
    assert!(!b.contains(4, 2));
    assert!(!b.contains(1, 5));
    assert!(b.within(Canvas::new(4, 5).unwrap()));
    assert!(!b.within(Canvas::new(3, 5).unwrap()));
}

#[test]
fn argb_pack_unpack_channel_order() {
    let px = pack_argb(0x11, 0x22, 0x33, 0x44);
    assert_eq!(px, 0x1122_3344);
    assert_eq!(unpack_argb(px), [0x11, 0x22, 0x33, 0x44]);
    assert_eq!(argb_to_rgba8(&[px]), vec![0x22, 0x33, 0x44, 0x11]);
}

#[test]
fn tint_decodes_rgb_from_high_bytes_and_inverts_alpha() {
    let t = TintColor::from_packed(0xFF80_4000);
    assert_eq!((t.r, t.g, t.b), (0xFF, 0x80, 0x40));
    assert_eq!(t.alpha_inv, 0);
    assert_eq!(t.opacity(), 255);

    let t = TintColor::from_packed(0x0000_00FF);
    assert_eq!(t.opacity(), 0);

    let t = TintColor::from_packed(0x1234_5640);
    assert_eq!(t.opacity(), 255 - 0x40);
    assert_eq!(t.to_packed(), 0x1234_5640);
}
