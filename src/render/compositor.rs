use crate::{
    animation::state::{AnimationState, OffsetTable},
    assets::atlas::AtlasSlot,
    foundation::core::{PixelRect, RgbaRaster},
    grid::geometry::{GridConfig, dest_rect, source_rect},
    render::{
        background::{Theme, paint_checkerboard},
        blit::blit_nearest,
        overlay::draw_alignment_guides,
    },
};

/// Integer preview zoom in `[Zoom::MIN, Zoom::MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Zoom(u32);

impl Zoom {
    /// Smallest zoom.
    pub const MIN: u32 = 1;
    /// Largest zoom; stepping past it wraps to [`Zoom::MIN`].
    pub const MAX: u32 = 8;

    /// Zoom clamped into range.
    pub fn new(level: u32) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    /// Zoom factor.
    pub fn get(self) -> u32 {
        self.0
    }

    /// One level up, wrapping to 1 after the maximum.
    pub fn next(self) -> Self {
        if self.0 >= Self::MAX {
            Self(Self::MIN)
        } else {
            Self(self.0 + 1)
        }
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(2)
    }
}

impl From<u32> for Zoom {
    fn from(level: u32) -> Self {
        Self::new(level)
    }
}

impl From<Zoom> for u32 {
    fn from(z: Zoom) -> Self {
        z.0
    }
}

/// Presentation toggles for the live preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    /// Integer scale of the drawn frame.
    pub zoom: Zoom,
    /// Checkerboard palette.
    pub theme: Theme,
    /// Draw crosshair and frame outline.
    pub show_grid: bool,
}

/// Everything one draw needs to know about what to show.
///
/// Holds value copies so edits to the caller's tables between draws cannot affect a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRequest {
    /// Atlas layout.
    pub grid: GridConfig,
    /// Active state (selects the row).
    pub state: AnimationState,
    /// Frame index within the row.
    pub frame: u32,
    /// Offset table snapshot.
    pub offsets: OffsetTable,
}

impl FrameRequest {
    /// Source rectangle this request slices from an atlas of the given size.
    pub fn source_rect(&self, atlas_w: u32, atlas_h: u32) -> PixelRect {
        source_rect(
            atlas_w,
            atlas_h,
            self.grid,
            self.state,
            self.frame,
            self.offsets.get(self.state),
        )
    }
}

/// Why a tick drew nothing. Expected and transient; never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Atlas decode has not finished.
    AtlasPending,
    /// Atlas decode failed; preview stays blank.
    AtlasFailed,
    /// The grid yields an empty cell (for example `cols == 0`).
    DegenerateFrame,
}

/// Result of one draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawOutcome {
    /// Frame drawn from `source` (atlas space) into `dest` (viewport space).
    Drawn {
        /// Atlas rectangle sampled.
        source: PixelRect,
        /// Viewport rectangle written.
        dest: PixelRect,
    },
    /// Nothing sliced this tick.
    Skipped(SkipReason),
}

impl DrawOutcome {
    /// `true` when a frame was drawn.
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn { .. })
    }
}

/// Tick-driven renderer of the current frame into a viewport-sized surface.
#[derive(Clone, Debug, Default)]
pub struct LiveCompositor {
    surface: RgbaRaster,
    options: PreviewOptions,
}

impl LiveCompositor {
    /// New compositor with an empty surface.
    pub fn new(options: PreviewOptions) -> Self {
        Self {
            surface: RgbaRaster::default(),
            options,
        }
    }

    /// Current presentation options.
    pub fn options(&self) -> &PreviewOptions {
        &self.options
    }

    /// Mutable presentation options; changes apply from the next draw.
    pub fn options_mut(&mut self) -> &mut PreviewOptions {
        &mut self.options
    }

    /// Last rendered surface.
    pub fn surface(&self) -> &RgbaRaster {
        &self.surface
    }

    /// Render one complete frame into a `viewport` (width, height) surface.
    ///
    /// While the atlas is not ready the surface is left untouched and the draw reports
    /// [`DrawOutcome::Skipped`]; the caller simply draws again on the next tick.
    pub fn draw(&mut self, viewport: (u32, u32), slot: &AtlasSlot, req: &FrameRequest) -> DrawOutcome {
        let atlas = match slot {
            AtlasSlot::Ready(atlas) => atlas,
            AtlasSlot::Pending => {
                tracing::trace!("atlas pending, draw skipped");
                return DrawOutcome::Skipped(SkipReason::AtlasPending);
            }
            AtlasSlot::Failed(_) => return DrawOutcome::Skipped(SkipReason::AtlasFailed),
        };

        let (view_w, view_h) = viewport;
        if self.surface.width != view_w || self.surface.height != view_h {
            tracing::debug!(view_w, view_h, "resizing preview surface");
            self.surface = RgbaRaster::transparent(view_w, view_h);
        }

        paint_checkerboard(&mut self.surface, self.options.theme);

        let source = req.source_rect(atlas.width(), atlas.height());
        if source.is_empty() {
            tracing::trace!(grid = ?req.grid, "degenerate frame, draw skipped");
            return DrawOutcome::Skipped(SkipReason::DegenerateFrame);
        }

        let dest = dest_rect(
            view_w,
            view_h,
            source.width,
            source.height,
            f64::from(self.options.zoom.get()),
        );
        blit_nearest(atlas, source, &mut self.surface, dest);

        if self.options.show_grid {
            draw_alignment_guides(&mut self.surface, dest);
        }

        DrawOutcome::Drawn { source, dest }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
