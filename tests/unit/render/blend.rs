use super::*;

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [255, 255, 255, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_half_white_on_opaque_black() {
    assert_eq!(over([0, 0, 0, 255], [255, 255, 255, 128]), [128, 128, 128, 255]);
}

#[test]
fn over_transparent_dst_keeps_src_color() {
    assert_eq!(over([0, 0, 0, 0], [100, 110, 120, 200]), [100, 110, 120, 200]);
}

#[test]
fn blend_px_ignores_out_of_bounds() {
    let mut r = RgbaRaster::transparent(1, 1);
    blend_px(&mut r, -1, 0, [255, 255, 255, 255]);
    blend_px(&mut r, 0, 1, [255, 255, 255, 255]);
    assert_eq!(r.data, vec![0, 0, 0, 0]);
    blend_px(&mut r, 0, 0, [1, 2, 3, 255]);
    assert_eq!(r.data, vec![1, 2, 3, 255]);
}

#[test]
fn blend_px_ignores_pixels_past_a_short_buffer() {
    let mut dst = RgbaRaster {
        width: 2,
        height: 2,
        data: vec![0; 4],
    };
    blend_px(&mut dst, 1, 1, [255, 255, 255, 255]);
    assert_eq!(dst.data, vec![0; 4]);
    blend_px(&mut dst, 0, 0, [255, 255, 255, 255]);
    assert_eq!(dst.data, vec![255; 4]);
}
