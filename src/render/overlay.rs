use crate::{
    foundation::core::{PixelRect, RgbaRaster},
    render::blend::{Rgba8, blend_px},
};

/// Crosshair color through the viewport center.
pub const CROSSHAIR_RGBA: Rgba8 = [217, 70, 239, 160];
/// Outline color around the drawn frame.
pub const OUTLINE_RGBA: Rgba8 = [255, 255, 255, 96];

/// Alignment guides: a crosshair through the viewport center and a 1px outline around `frame`.
pub fn draw_alignment_guides(dst: &mut RgbaRaster, frame: PixelRect) {
    let w = i64::from(dst.width);
    let h = i64::from(dst.height);
    let cx = w / 2;
    let cy = h / 2;

    for x in 0..w {
        blend_px(dst, x, cy, CROSSHAIR_RGBA);
    }
    for y in 0..h {
        if y != cy {
            blend_px(dst, cx, y, CROSSHAIR_RGBA);
        }
    }

    if frame.is_empty() {
        return;
    }
    let (left, top) = (frame.x, frame.y);
    let (right, bottom) = (frame.right() - 1, frame.bottom() - 1);
    for x in left..=right {
        blend_px(dst, x, top, OUTLINE_RGBA);
        if bottom != top {
            blend_px(dst, x, bottom, OUTLINE_RGBA);
        }
    }
    for y in (top + 1)..bottom {
        blend_px(dst, left, y, OUTLINE_RGBA);
        if right != left {
            blend_px(dst, right, y, OUTLINE_RGBA);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
