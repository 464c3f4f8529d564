//! Software rendering of the live preview.
//!
//! Everything draws into [`crate::RgbaRaster`] surfaces with nearest-neighbor sampling; nothing here
//! touches a window or GPU.

pub mod background;
pub mod blend;
pub mod blit;
/// Per-tick preview renderer.
pub mod compositor;
pub mod overlay;
