use std::io::Cursor;

use super::*;

fn png_bytes(img: &image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_keeps_straight_alpha() {
    let img = image::RgbaImage::from_raw(2, 1, vec![100, 50, 200, 128, 1, 2, 3, 255]).unwrap();
    let atlas = decode_atlas(&png_bytes(&img)).unwrap();
    assert_eq!((atlas.width(), atlas.height()), (2, 1));
    assert_eq!(atlas.pixel(0, 0), [100, 50, 200, 128]);
    assert_eq!(atlas.pixel(1, 0), [1, 2, 3, 255]);
    assert_eq!(atlas.pixel(2, 0), [0, 0, 0, 0]);
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_atlas(b"not an image").unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn missing_file_is_an_error() {
    let err = load_atlas(Path::new("target/definitely/missing/atlas.png")).unwrap_err();
    assert!(err.to_string().contains("atlas"));
}

#[test]
fn from_rgba8_checks_length() {
    assert!(AtlasImage::from_rgba8(2, 2, vec![0; 16]).is_ok());
    assert!(AtlasImage::from_rgba8(2, 2, vec![0; 12]).is_err());
}

#[test]
fn slot_resolves_once() {
    let mut slot = AtlasSlot::default();
    assert!(slot.ready().is_none());

    slot.resolve(AtlasImage::from_rgba8(1, 1, vec![1, 2, 3, 4]));
    assert_eq!(slot.ready().map(|a| a.width()), Some(1));

    slot.resolve(Err(SpriteError::decode("late failure")));
    assert!(slot.ready().is_some());
}

#[test]
fn failed_slot_keeps_reason() {
    let slot = AtlasSlot::from(decode_atlas(b"xx"));
    match slot {
        AtlasSlot::Failed(reason) => assert!(reason.contains("decode error")),
        other => panic!("expected failure, got {other:?}"),
    }
}
