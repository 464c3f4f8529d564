//! Pure rectangle math shared by the live compositor and the export slicer.
//!
//! Grid well-formedness is never validated: atlas dimensions that do not divide evenly by the grid
//! are truncated with integer floor division, and offsets may push a rectangle past the atlas edge.

use crate::{
    animation::state::{AnimationState, FrameOffset},
    foundation::core::PixelRect,
};

/// Rows x cols layout of the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows (animation states).
    pub rows: u32,
    /// Number of columns (frames per state).
    pub cols: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 4, cols: 4 }
    }
}

impl GridConfig {
    /// Build a grid.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Cell size for an atlas of `atlas_w x atlas_h`; zero in any axis with no cells.
    pub fn frame_size(self, atlas_w: u32, atlas_h: u32) -> (u32, u32) {
        (
            atlas_w.checked_div(self.cols).unwrap_or(0),
            atlas_h.checked_div(self.rows).unwrap_or(0),
        )
    }
}

/// Atlas rectangle holding frame `frame_index` of `state`, shifted by `offset`.
pub fn source_rect(
    atlas_w: u32,
    atlas_h: u32,
    grid: GridConfig,
    state: AnimationState,
    frame_index: u32,
    offset: FrameOffset,
) -> PixelRect {
    let (frame_w, frame_h) = grid.frame_size(atlas_w, atlas_h);
    let x = i64::from(frame_index) * i64::from(frame_w) + i64::from(offset.x);
    let y = i64::from(state.row()) * i64::from(frame_h) + i64::from(offset.y);
    PixelRect::new(x, y, frame_w, frame_h)
}

/// Viewport rectangle for a `frame_w x frame_h` cell scaled by `scale` and centered.
///
/// When the scaled frame is larger than the viewport the origin goes negative; drawing clips it.
pub fn dest_rect(view_w: u32, view_h: u32, frame_w: u32, frame_h: u32, scale: f64) -> PixelRect {
    let dest_w = scaled_len(frame_w, scale);
    let dest_h = scaled_len(frame_h, scale);
    let dx = (i64::from(view_w) - i64::from(dest_w)).div_euclid(2);
    let dy = (i64::from(view_h) - i64::from(dest_h)).div_euclid(2);
    PixelRect::new(dx, dy, dest_w, dest_h)
}

fn scaled_len(len: u32, scale: f64) -> u32 {
    let v = (f64::from(len) * scale).round();
    if v.is_finite() && v > 0.0 {
        v.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/geometry.rs"]
mod tests;
