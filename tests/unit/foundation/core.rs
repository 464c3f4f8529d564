use super::*;

#[test]
fn rect_edges_and_emptiness() {
    let r = PixelRect::new(-4, 10, 8, 6);
    assert_eq!(r.right(), 4);
    assert_eq!(r.bottom(), 16);
    assert!(!r.is_empty());
    assert!(PixelRect::new(0, 0, 0, 5).is_empty());
}

#[test]
fn scaled_multiplies_origin_and_size() {
    let r = PixelRect::new(10, -5, 256, 256).scaled(4);
    assert_eq!(r, PixelRect::new(40, -20, 1024, 1024));
}

#[test]
fn raster_from_raw_checks_length() {
    assert!(RgbaRaster::from_raw(2, 2, vec![0; 16]).is_ok());
    assert!(RgbaRaster::from_raw(2, 2, vec![0; 15]).is_err());
}

#[test]
fn pixel_outside_reads_transparent() {
    let r = RgbaRaster::from_raw(1, 1, vec![9, 8, 7, 255]).unwrap();
    assert_eq!(r.pixel(0, 0), [9, 8, 7, 255]);
    assert_eq!(r.pixel(-1, 0), [0, 0, 0, 0]);
    assert_eq!(r.pixel(0, 1), [0, 0, 0, 0]);
}

#[test]
fn crop_pads_outside_with_transparent() {
    let mut r = RgbaRaster::transparent(2, 2);
    r.fill([5, 5, 5, 255]);
    let c = r.crop(PixelRect::new(1, 1, 2, 2));
    assert_eq!(c.pixel(0, 0), [5, 5, 5, 255]);
    assert_eq!(c.pixel(1, 0), [0, 0, 0, 0]);
    assert_eq!(c.pixel(0, 1), [0, 0, 0, 0]);
}
