//! Spriteforge animates and exports sprite sheets laid out as a rows x cols grid.
//!
//! Each atlas row holds one animation state (idle, run, jump, attack) and each column one frame of
//! it. The crate turns such an atlas into pixels two ways:
//!
//! 1. **Preview**: an [`AnimationClock`] driven by external ticks picks the current frame, and a
//!    [`LiveCompositor`] draws it centered and integer-zoomed over a checkerboard.
//!    [`PreviewSession`] bundles both with the viewer's controls.
//! 2. **Export**: [`slice_animation`] and [`slice_static`] cut frames out of an optionally upscaled
//!    atlas; [`encode_gif`] and [`encode_png`] turn them into files.
//!
//! Both paths share the rectangle math in [`source_rect`] and the nearest-neighbor sampler in
//! [`blit_nearest`], so an export at factor 1 holds exactly the pixels the preview draws at zoom 1.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No smoothing**: every scale is nearest-neighbor.
//! - **Not-ready is not an error**: drawing before the atlas decodes returns
//!   [`DrawOutcome::Skipped`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod config;
mod export;
mod foundation;
mod grid;
mod render;
mod session;

pub use animation::clock::{AnimationClock, ClockConfig, ClockSnapshot, ClockState, advance};
pub use animation::ease::Ease;
pub use animation::state::{AnimationState, FrameOffset, OffsetTable};
pub use assets::atlas::{AtlasImage, AtlasSlot, decode_atlas, load_atlas};
pub use config::session::{ExportConfig, PlaybackConfig, SessionConfig};
pub use export::encode::{
    encode_gif, encode_png, encode_static, ensure_parent_dir, gif_delay_ms, write_output,
};
pub use export::slicer::{
    AnimationExport, EXPORT_FRAME_DELAY_MS, ExportFrame, ExportQuality, ExportRequest,
    StaticExport, animation_filename, export_animation, export_static, slice_animation,
    slice_static, static_filename,
};
pub use foundation::core::{PixelRect, RgbaRaster};
pub use foundation::error::{SpriteError, SpriteResult};
pub use grid::geometry::{GridConfig, dest_rect, source_rect};
pub use render::background::{TILE_SIZE, Theme, paint_checkerboard};
pub use render::blend::{Rgba8, blend_px, over};
pub use render::blit::{blit_nearest, upscale_nearest};
pub use render::compositor::{
    DrawOutcome, FrameRequest, LiveCompositor, PreviewOptions, SkipReason, Zoom,
};
pub use render::overlay::{CROSSHAIR_RGBA, OUTLINE_RGBA, draw_alignment_guides};
pub use session::preview::{PreviewSession, PreviewStatus, StepDirection};
