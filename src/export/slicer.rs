use std::{borrow::Cow, future::IntoFuture};

use crate::{
    animation::state::{AnimationState, FrameOffset},
    assets::atlas::AtlasImage,
    foundation::{
        core::{PixelRect, RgbaRaster},
        error::{SpriteError, SpriteResult},
    },
    grid::geometry::{GridConfig, source_rect},
    render::blit::{blit_nearest, upscale_nearest},
};

/// Display time of every exported animation frame. Independent of the preview fps.
pub const EXPORT_FRAME_DELAY_MS: u32 = 125;

/// Export resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportQuality {
    /// Native atlas pixels.
    Standard,
    /// 4x nearest-neighbor upscale.
    #[default]
    Upscaled,
}

impl ExportQuality {
    /// Integer upscale factor.
    pub fn factor(self) -> u32 {
        match self {
            Self::Standard => 1,
            Self::Upscaled => 4,
        }
    }

    /// Quality from an "upscale on export" toggle.
    pub fn from_upscale(upscale: bool) -> Self {
        if upscale {
            Self::Upscaled
        } else {
            Self::Standard
        }
    }
}

/// Inputs of an animated export, copied out of the preview at request time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRequest {
    /// Atlas layout.
    pub grid: GridConfig,
    /// State whose row is exported.
    pub state: AnimationState,
    /// That state's offset.
    pub offset: FrameOffset,
    /// Export resolution.
    pub quality: ExportQuality,
}

/// One exported frame with its display time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFrame {
    /// Frame pixels.
    pub raster: RgbaRaster,
    /// Display time in milliseconds.
    pub delay_ms: u32,
}

/// Ordered frames of one state, ready for the animation encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationExport {
    /// Exported state.
    pub state: AnimationState,
    /// Upscale factor applied.
    pub factor: u32,
    /// Frames in playback order, one per column.
    pub frames: Vec<ExportFrame>,
    /// Suggested file name.
    pub filename: String,
}

/// Whole atlas as a single raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticExport {
    /// Upscaled atlas pixels.
    pub raster: RgbaRaster,
    /// Upscale factor applied.
    pub factor: u32,
    /// Suggested file name.
    pub filename: String,
}

/// Suggested name for an animated export of `state`.
pub fn animation_filename(state: AnimationState) -> String {
    format!("ANIMATION_{}.gif", state.tag())
}

/// Suggested name for a static export.
pub fn static_filename(entity_name: Option<&str>, factor: u32) -> String {
    let name = entity_name
        .map(|n| n.split_whitespace().collect::<Vec<_>>().join("_"))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "UNKNOWN".to_string());
    format!("ENTITY_{name}_{factor}X.png")
}

/// Slice every frame of `req.state` out of the atlas.
///
/// Uses the same rectangle math as the live preview: at factor 1 each frame is exactly what the
/// preview draws before zoom. At higher factors the atlas is upscaled first and both frame size
/// and offset scale with it.
#[tracing::instrument(skip(atlas), fields(atlas_w = atlas.width(), atlas_h = atlas.height()))]
pub fn slice_animation(atlas: &AtlasImage, req: &ExportRequest) -> AnimationExport {
    let factor = req.quality.factor();
    let source: Cow<'_, AtlasImage> = if factor == 1 {
        Cow::Borrowed(atlas)
    } else {
        Cow::Owned(upscale_nearest(atlas, factor))
    };

    let (frame_w, frame_h) = req.grid.frame_size(atlas.width(), atlas.height());
    let target = PixelRect::new(0, 0, frame_w, frame_h).scaled(factor);
    // One scratch surface per call; concurrent exports never share it.
    let mut scratch = RgbaRaster::transparent(target.width, target.height);

    let mut frames = Vec::with_capacity(req.grid.cols as usize);
    for i in 0..req.grid.cols {
        scratch.fill([0, 0, 0, 0]);
        let rect = source_rect(
            atlas.width(),
            atlas.height(),
            req.grid,
            req.state,
            i,
            req.offset,
        )
        .scaled(factor);
        blit_nearest(&source, rect, &mut scratch, target);
        frames.push(ExportFrame {
            raster: scratch.clone(),
            delay_ms: EXPORT_FRAME_DELAY_MS,
        });
    }

    tracing::debug!(
        frames = frames.len(),
        width = target.width,
        height = target.height,
        "sliced animation"
    );

    AnimationExport {
        state: req.state,
        factor,
        frames,
        filename: animation_filename(req.state),
    }
}

/// Upscale the whole atlas once and return it as one image.
#[tracing::instrument(skip(atlas), fields(atlas_w = atlas.width(), atlas_h = atlas.height()))]
pub fn slice_static(
    atlas: &AtlasImage,
    quality: ExportQuality,
    entity_name: Option<&str>,
) -> StaticExport {
    let factor = quality.factor();
    let raster = upscale_nearest(atlas, factor).to_raster();
    StaticExport {
        raster,
        factor,
        filename: static_filename(entity_name, factor),
    }
}

/// Wait for the atlas decode to resolve, then slice the animation.
///
/// The decode is awaited exactly once; a failure aborts the export as a decode error and is not
/// retried.
#[tracing::instrument(skip(atlas))]
pub async fn export_animation<F>(atlas: F, req: &ExportRequest) -> SpriteResult<AnimationExport>
where
    F: IntoFuture<Output = SpriteResult<AtlasImage>>,
{
    let atlas = atlas.await.map_err(as_decode_error)?;
    Ok(slice_animation(&atlas, req))
}

/// Wait for the atlas decode to resolve, then produce the static export.
#[tracing::instrument(skip(atlas))]
pub async fn export_static<F>(
    atlas: F,
    quality: ExportQuality,
    entity_name: Option<&str>,
) -> SpriteResult<StaticExport>
where
    F: IntoFuture<Output = SpriteResult<AtlasImage>>,
{
    let atlas = atlas.await.map_err(as_decode_error)?;
    Ok(slice_static(&atlas, quality, entity_name))
}

fn as_decode_error(e: SpriteError) -> SpriteError {
    tracing::warn!(error = %e, "atlas failed to load, export aborted");
    match e {
        SpriteError::Decode(_) => e,
        other => SpriteError::decode(other.to_string()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/slicer.rs"]
mod tests;
