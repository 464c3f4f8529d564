use crate::{
    assets::atlas::AtlasImage,
    foundation::core::{Affine, PixelRect, Point, RgbaRaster},
};

/// Copy `src_rect` of the atlas into `dst_rect` of `dst` with nearest-neighbor scaling.
///
/// Destination pixels are replaced, not blended. Source samples outside the atlas read as
/// transparent black; destination pixels outside `dst` are clipped.
pub fn blit_nearest(src: &AtlasImage, src_rect: PixelRect, dst: &mut RgbaRaster, dst_rect: PixelRect) {
    if src_rect.is_empty() || dst_rect.is_empty() {
        return;
    }

    let map = dest_to_source(src_rect, dst_rect);

    let x0 = dst_rect.x.max(0);
    let y0 = dst_rect.y.max(0);
    let x1 = dst_rect.right().min(i64::from(dst.width));
    let y1 = dst_rect.bottom().min(i64::from(dst.height));
    let stride = dst.width as usize;

    for y in y0..y1 {
        for x in x0..x1 {
            // Sample at the destination pixel center.
            let p = map * Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let px = src.pixel(p.x.floor() as i64, p.y.floor() as i64);
            let idx = ((y as usize) * stride + (x as usize)) * 4;
            // Short buffers drop the out-of-range writes.
            if let Some(d) = dst.data.get_mut(idx..idx + 4) {
                d.copy_from_slice(&px);
            }
        }
    }
}

/// Whole-atlas nearest-neighbor upscale by an integer factor (`0` is treated as `1`).
pub fn upscale_nearest(atlas: &AtlasImage, factor: u32) -> AtlasImage {
    let factor = factor.max(1);
    if factor == 1 {
        return atlas.clone();
    }
    let full = PixelRect::new(0, 0, atlas.width(), atlas.height());
    let target = full.scaled(factor);
    let mut out = RgbaRaster::transparent(target.width, target.height);
    blit_nearest(atlas, full, &mut out, target);
    AtlasImage::from(out)
}

fn dest_to_source(src: PixelRect, dst: PixelRect) -> Affine {
    let sx = f64::from(src.width) / f64::from(dst.width);
    let sy = f64::from(src.height) / f64::from(dst.height);
    Affine::translate((src.x as f64, src.y as f64))
        * Affine::scale_non_uniform(sx, sy)
        * Affine::translate((-(dst.x as f64), -(dst.y as f64)))
}

#[cfg(test)]
#[path = "../../tests/unit/render/blit.rs"]
mod tests;
