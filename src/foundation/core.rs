use crate::foundation::error::{SpriteError, SpriteResult};

pub use kurbo::{Affine, Point};

/// Integer pixel rectangle.
///
/// The origin may be negative or lie past an image edge; sampling outside the image reads
/// transparent pixels rather than clamping the rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge in pixels.
    pub x: i64,
    /// Top edge in pixels.
    pub y: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Build a rectangle from origin and size.
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        self.x + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        self.y + i64::from(self.height)
    }

    /// Scale origin and size by an integer factor.
    pub fn scaled(self, factor: u32) -> Self {
        let k = i64::from(factor);
        Self {
            x: self.x * k,
            y: self.y * k,
            width: self.width.saturating_mul(factor),
            height: self.height.saturating_mul(factor),
        }
    }
}

/// A straight-alpha RGBA8 raster, tightly packed, row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RgbaRaster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl RgbaRaster {
    /// A fully transparent raster.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; byte_len(width, height)],
        }
    }

    /// Wrap an existing buffer, checking its length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> SpriteResult<Self> {
        let expected = byte_len(width, height);
        if data.len() != expected {
            return Err(SpriteError::validation(format!(
                "rgba8 buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Pixel at `(x, y)`; transparent black outside the raster.
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 4] {
        sample_px(&self.data, self.width, self.height, x, y)
    }

    /// Copy of `rect`; parts outside the raster read as transparent.
    pub fn crop(&self, rect: PixelRect) -> RgbaRaster {
        let mut out = RgbaRaster::transparent(rect.width, rect.height);
        for (row, y) in (rect.y..rect.bottom()).enumerate() {
            for (col, x) in (rect.x..rect.right()).enumerate() {
                let idx = (row * rect.width as usize + col) * 4;
                out.data[idx..idx + 4].copy_from_slice(&self.pixel(x, y));
            }
        }
        out
    }

    /// Set every pixel to `rgba`.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Copy into an `image` buffer for encoding.
    pub fn to_rgba_image(&self) -> SpriteResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| SpriteError::validation("raster buffer does not match its dimensions"))
    }
}

pub(crate) fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4)
}

pub(crate) fn sample_px(src: &[u8], width: u32, height: u32, x: i64, y: i64) -> [u8; 4] {
    if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
        return [0, 0, 0, 0];
    }
    let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
    match src.get(idx..idx + 4) {
        Some(px) => [px[0], px[1], px[2], px[3]],
        None => [0, 0, 0, 0],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
