use super::*;

fn frag(bitmap: &[u8], stride: i32, color: u32, x: i32) -> MaskFragment<'_> {
    MaskFragment {
        width: 2,
        height: 2,
        stride,
        bitmap,
        color,
        dst_x: x,
        dst_y: 0,
    }
}

#[test]
fn identical_lists_match() {
    let bm = [1u8, 2, 3, 4];
    let a = fingerprint_fragments(&[frag(&bm, 2, 0xFF, 0)]);
    let b = fingerprint_fragments(&[frag(&bm.clone(), 2, 0xFF, 0)]);
    assert_eq!(a, b);
}

#[test]
fn geometry_color_and_coverage_are_covered() {
    let bm = [1u8, 2, 3, 4];
    let bm2 = [1u8, 2, 3, 5];
    let base = fingerprint_fragments(&[frag(&bm, 2, 0xFF, 0)]);
    assert_ne!(base, fingerprint_fragments(&[frag(&bm, 2, 0xFF, 1)]));
    assert_ne!(base, fingerprint_fragments(&[frag(&bm, 2, 0xFE, 0)]));
    assert_ne!(base, fingerprint_fragments(&[frag(&bm2, 2, 0xFF, 0)]));
    assert_ne!(base, fingerprint_fragments(&[]));
}

#[test]
fn stride_padding_is_ignored() {
    let tight = [1u8, 2, 3, 4];
    let padded = [1u8, 2, 9, 3, 4, 9];
    assert_eq!(
        fingerprint_fragments(&[frag(&tight, 2, 0, 0)]),
        fingerprint_fragments(&[frag(&padded, 3, 0, 0)])
    );
}

#[test]
fn order_is_significant() {
    let bm = [1u8, 2, 3, 4];
    let a = frag(&bm, 2, 0x10, 0);
    let b = frag(&bm, 2, 0x20, 0);
    assert_ne!(fingerprint_fragments(&[a, b]), fingerprint_fragments(&[b, a]));
}
