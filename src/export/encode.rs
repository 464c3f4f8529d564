use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;
use image::codecs::gif::{GifEncoder, Repeat};

use crate::export::slicer::{AnimationExport, StaticExport};
use crate::foundation::core::RgbaRaster;
use crate::foundation::error::{SpriteError, SpriteResult};

/// GIF stores delays in hundredths of a second; round half up to the nearest one.
pub fn gif_delay_ms(delay_ms: u32) -> u32 {
    delay_ms.saturating_add(5) / 10 * 10
}

/// Encode the frames of an animated export as a looping GIF.
///
/// Frames play in export order and the animation repeats forever.
#[tracing::instrument(skip(export), fields(state = %export.state, frames = export.frames.len()))]
pub fn encode_gif(export: &AnimationExport) -> SpriteResult<Vec<u8>> {
    if export.frames.is_empty() {
        return Err(SpriteError::encode("animation has no frames"));
    }

    let mut frames = Vec::with_capacity(export.frames.len());
    for (i, f) in export.frames.iter().enumerate() {
        if f.raster.width == 0 || f.raster.height == 0 {
            return Err(SpriteError::encode(format!("frame {i} has zero size")));
        }
        let img = f.raster.to_rgba_image()?;
        let delay = image::Delay::from_numer_denom_ms(gif_delay_ms(f.delay_ms), 1);
        frames.push(image::Frame::from_parts(img, 0, 0, delay));
    }

    let mut out = Vec::new();
    {
        let mut enc = GifEncoder::new(&mut out);
        enc.set_repeat(Repeat::Infinite)
            .map_err(|e| SpriteError::encode(format!("gif repeat: {e}")))?;
        enc.encode_frames(frames)
            .map_err(|e| SpriteError::encode(format!("gif frames: {e}")))?;
    }

    tracing::debug!(bytes = out.len(), "encoded gif");
    Ok(out)
}

/// Encode a raster as PNG.
pub fn encode_png(raster: &RgbaRaster) -> SpriteResult<Vec<u8>> {
    if raster.width == 0 || raster.height == 0 {
        return Err(SpriteError::encode("cannot encode an empty raster"));
    }
    let img = raster.to_rgba_image()?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| SpriteError::encode(format!("png: {e}")))?;
    Ok(out.into_inner())
}

/// Encode the upscaled atlas of a static export as PNG.
pub fn encode_static(export: &StaticExport) -> SpriteResult<Vec<u8>> {
    encode_png(&export.raster)
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> SpriteResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write encoded bytes to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, bytes: &[u8]) -> SpriteResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote export");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/export/encode.rs"]
mod tests;
