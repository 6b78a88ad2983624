use super::*;

#[test]
fn color_accepts_int_and_hex_forms() {
    let a: PackedColor = serde_json::from_str("4278190080").unwrap();
    let b: PackedColor = serde_json::from_str("\"#FF000000\"").unwrap();
    let c: PackedColor = serde_json::from_str("\"0xff000000\"").unwrap();
    assert_eq!(a, PackedColor(0xFF00_0000));
    assert_eq!(a, b);
    assert_eq!(b, c);

    assert!(serde_json::from_str::<PackedColor>("\"#FFF\"").is_err());
    assert!(serde_json::from_str::<PackedColor>("\"#GG000000\"").is_err());
}

#[test]
fn color_serializes_as_hex() {
    let s = serde_json::to_string(&PackedColor(0x1234_ABCD)).unwrap();
    assert_eq!(s, "\"#1234ABCD\"");
}

#[test]
fn stride_defaults_to_width() {
    let d: FragmentDump = serde_json::from_str(
        r##"{ "width": 2, "height": 1, "color": "#FFFFFF00", "bitmap": [1, 2] }"##,
    )
    .unwrap();
    assert_eq!(d.stride(), 2);
    assert_eq!((d.dst_x, d.dst_y), (0, 0));
    d.validate().unwrap();
    let f = d.as_fragment();
    assert_eq!(f.row(0), Some(&[1u8, 2][..]));
    assert_eq!(f.color, 0xFFFF_FF00);
}

#[test]
fn validate_rejects_short_bitmap_and_narrow_stride() {
    let mut d = FragmentDump {
        width: 2,
        height: 2,
        stride: Some(3),
        dst_x: 0,
        dst_y: 0,
        color: PackedColor(0),
        bitmap: vec![0; 5],
    };
    assert!(d.validate().is_err());
    d.bitmap.push(0);
    d.validate().unwrap();
    d.stride = Some(1);
    assert!(d.validate().is_err());
}

#[test]
fn validate_allows_degenerate_sizes() {
    let d = FragmentDump {
        width: 0,
        height: 4,
        stride: None,
        dst_x: 0,
        dst_y: 0,
        color: PackedColor(0),
        bitmap: Vec::new(),
    };
    d.validate().unwrap();
    assert!(d.as_fragment().is_degenerate());
}

#[test]
fn capture_drops_stride_padding() {
    let bitmap = [1, 2, 0xEE, 3, 4, 0xEE];
    let f = MaskFragment {
        width: 2,
        height: 2,
        stride: 3,
        bitmap: &bitmap,
        color: 0x0102_0304,
        dst_x: -1,
        dst_y: 7,
    };
    let d = FragmentDump::capture(&f);
    assert_eq!(d.bitmap, vec![1, 2, 3, 4]);
    assert_eq!(d.stride(), 2);
    assert_eq!((d.dst_x, d.dst_y), (-1, 7));
    assert_eq!(d.color, PackedColor(0x0102_0304));
}
