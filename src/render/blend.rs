//! Straight-alpha source-over, used only for translucent overlay guides.

use crate::foundation::core::RgbaRaster;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// `src` over `dst`, both straight alpha.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // Alpha scaled by 255^2 keeps the color division exact.
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * inv;
        out[i] = ((num + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = mul_div255(out_a, 1).min(255) as u8;
    out
}

/// Blend one pixel into `dst`; coordinates outside the raster are ignored.
pub fn blend_px(dst: &mut RgbaRaster, x: i64, y: i64, src: Rgba8) {
    if x < 0 || y < 0 || x >= i64::from(dst.width) || y >= i64::from(dst.height) {
        return;
    }
    let idx = ((y as usize) * (dst.width as usize) + (x as usize)) * 4;
    let Some(d) = dst.data.get_mut(idx..idx + 4) else {
        return;
    };
    let out = over([d[0], d[1], d[2], d[3]], src);
    d.copy_from_slice(&out);
}

fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
