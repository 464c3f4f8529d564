use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::animation::clock::ClockConfig;
use crate::animation::ease::Ease;
use crate::animation::state::{AnimationState, OffsetTable};
use crate::export::slicer::{ExportQuality, ExportRequest};
use crate::foundation::error::{SpriteError, SpriteResult};
use crate::grid::geometry::GridConfig;
use crate::render::compositor::PreviewOptions;

/// Playback settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Whether the clock advances frames.
    pub playing: bool,
    /// Frames per second.
    pub fps: f64,
    /// State-switch transition length in milliseconds.
    pub transition_ms: f64,
    /// Transition easing curve.
    pub easing: Ease,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            playing: true,
            fps: 8.0,
            transition_ms: 0.0,
            easing: Ease::default(),
        }
    }
}

/// Export settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output resolution.
    pub quality: ExportQuality,
    /// Name used in static export file names.
    pub entity_name: Option<String>,
}

/// A saved preview session: everything needed to reproduce what the viewer shows.
///
/// Every field has a default, so partial documents load.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Atlas layout.
    pub grid: GridConfig,
    /// Active animation state.
    pub state: AnimationState,
    /// Per-state offsets.
    pub offsets: OffsetTable,
    /// Playback settings.
    pub playback: PlaybackConfig,
    /// Presentation toggles.
    pub preview: PreviewOptions,
    /// Export settings.
    pub export: ExportConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            state: AnimationState::Run,
            offsets: OffsetTable::default(),
            playback: PlaybackConfig::default(),
            preview: PreviewOptions::default(),
            export: ExportConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a session from JSON text.
    pub fn from_json_str(s: &str) -> SpriteResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| SpriteError::validation(format!("parse session JSON: {e}")))
    }

    /// Parse a session from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SpriteResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SpriteError::validation(format!("parse session JSON: {e}")))
    }

    /// Parse a session from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SpriteResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SpriteError::validation(format!("open session JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> SpriteResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SpriteError::serde(format!("serialize session JSON: {e}")))
    }

    /// Clock parameters for this session.
    pub fn clock_config(&self) -> ClockConfig {
        ClockConfig {
            playing: self.playback.playing,
            fps: self.playback.fps,
            cols: self.grid.cols,
            state: self.state,
            transition_ms: self.playback.transition_ms,
            ease: self.playback.easing,
        }
    }

    /// Export request for the active state at the configured quality.
    pub fn export_request(&self) -> ExportRequest {
        ExportRequest {
            grid: self.grid,
            state: self.state,
            offset: self.offsets.get(self.state),
            quality: self.export.quality,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/session.rs"]
mod tests;
