use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::{
    core::{RgbaRaster, byte_len, sample_px},
    error::{SpriteError, SpriteResult},
};

/// Decoded atlas in straight-alpha RGBA8.
///
/// Pixels are shared behind an `Arc`; the engine never mutates an atlas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtlasImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl AtlasImage {
    /// Wrap a raw buffer, checking its length against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> SpriteResult<Self> {
        let expected = byte_len(width, height);
        if rgba8.len() != expected {
            return Err(SpriteError::validation(format!(
                "atlas buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at `(x, y)`; transparent black outside the atlas.
    pub fn pixel(&self, x: i64, y: i64) -> [u8; 4] {
        sample_px(&self.rgba8, self.width, self.height, x, y)
    }

    /// Copy out as a standalone raster.
    pub fn to_raster(&self) -> RgbaRaster {
        RgbaRaster {
            width: self.width,
            height: self.height,
            data: self.rgba8.as_ref().clone(),
        }
    }
}

impl From<image::RgbaImage> for AtlasImage {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            rgba8: Arc::new(img.into_raw()),
        }
    }
}

impl From<RgbaRaster> for AtlasImage {
    fn from(r: RgbaRaster) -> Self {
        Self {
            width: r.width,
            height: r.height,
            rgba8: Arc::new(r.data),
        }
    }
}

/// Decode encoded image bytes (PNG, GIF, ...) into an atlas.
pub fn decode_atlas(bytes: &[u8]) -> SpriteResult<AtlasImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| SpriteError::decode(format!("decode atlas image: {e}")))?;
    let atlas = AtlasImage::from(img.to_rgba8());
    if atlas.width == 0 || atlas.height == 0 {
        return Err(SpriteError::decode("atlas image has no pixels"));
    }
    Ok(atlas)
}

/// Read and decode an atlas file.
pub fn load_atlas(path: &Path) -> SpriteResult<AtlasImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read atlas '{}'", path.display()))?;
    decode_atlas(&bytes).map_err(|e| match e {
        SpriteError::Decode(msg) => SpriteError::decode(format!("'{}': {msg}", path.display())),
        other => other,
    })
}

/// Decode status of the atlas as seen by the live compositor.
///
/// Resolves once: `Pending` becomes either `Ready` or `Failed` and stays there.
#[derive(Clone, Debug, Default)]
pub enum AtlasSlot {
    /// Decode has not finished yet.
    #[default]
    Pending,
    /// Fully decoded atlas.
    Ready(AtlasImage),
    /// Decode failed; the reason is kept for display.
    Failed(String),
}

impl AtlasSlot {
    /// Settle a pending slot from a decode result. Already-settled slots are left unchanged.
    pub fn resolve(&mut self, result: SpriteResult<AtlasImage>) {
        if !matches!(self, Self::Pending) {
            tracing::debug!("ignoring second resolution of atlas slot");
            return;
        }
        *self = match result {
            Ok(atlas) => Self::Ready(atlas),
            Err(e) => Self::Failed(e.to_string()),
        };
    }

    /// The atlas, if decoded.
    pub fn ready(&self) -> Option<&AtlasImage> {
        match self {
            Self::Ready(a) => Some(a),
            _ => None,
        }
    }
}

impl From<SpriteResult<AtlasImage>> for AtlasSlot {
    fn from(result: SpriteResult<AtlasImage>) -> Self {
        let mut slot = Self::Pending;
        slot.resolve(result);
        slot
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/atlas.rs"]
mod tests;
