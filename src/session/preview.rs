use crate::animation::clock::{AnimationClock, ClockConfig, ClockSnapshot};
use crate::animation::ease::Ease;
use crate::animation::state::{AnimationState, FrameOffset, OffsetTable};
use crate::assets::atlas::AtlasSlot;
use crate::config::session::SessionConfig;
use crate::export::slicer::{ExportQuality, ExportRequest};
use crate::grid::geometry::GridConfig;
use crate::render::compositor::{DrawOutcome, FrameRequest, LiveCompositor, PreviewOptions};

/// Direction of a single-frame step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    /// Next frame, wrapping to 0 after the last.
    Forward,
    /// Previous frame, wrapping to the last from 0.
    Backward,
}

/// On-screen readout of the preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewStatus {
    /// Frame index within the row.
    pub frame: u32,
    /// Atlas row of the active state.
    pub row: u32,
    /// Offset of the active state.
    pub offset: FrameOffset,
    /// Active state.
    pub state: AnimationState,
    /// Whether playback is running.
    pub playing: bool,
    /// Zoom factor.
    pub zoom: u32,
}

impl std::fmt::Display for PreviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<6} row {} frame {} offset ({}, {}) zoom {}x {}",
            self.state.tag(),
            self.row,
            self.frame,
            self.offset.x,
            self.offset.y,
            self.zoom,
            if self.playing { "playing" } else { "paused" },
        )
    }
}

/// Interactive preview: an animation clock feeding a live compositor, plus the viewer's controls.
///
/// The offset table lives here; every draw and export request receives a copy of it.
#[derive(Clone, Debug)]
pub struct PreviewSession {
    clock: AnimationClock,
    compositor: LiveCompositor,
    grid: GridConfig,
    offsets: OffsetTable,
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::from_config(&SessionConfig::default())
    }
}

impl PreviewSession {
    /// Build a session from a saved configuration.
    pub fn from_config(cfg: &SessionConfig) -> Self {
        Self {
            clock: AnimationClock::new(cfg.clock_config()),
            compositor: LiveCompositor::new(cfg.preview),
            grid: cfg.grid,
            offsets: cfg.offsets,
        }
    }

    /// Advance the clock to `now_ms` and draw the current frame into a `viewport` surface.
    pub fn tick(&mut self, now_ms: f64, viewport: (u32, u32), slot: &AtlasSlot) -> DrawOutcome {
        let snap = self.clock.tick(now_ms);
        let req = FrameRequest {
            grid: self.grid,
            state: self.state(),
            frame: snap.frame,
            offsets: self.offsets,
        };
        self.compositor.draw(viewport, slot, &req)
    }

    /// Clock values after the last tick.
    pub fn snapshot(&self) -> ClockSnapshot {
        self.clock.snapshot()
    }

    /// The clock.
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// The compositor and its last surface.
    pub fn compositor(&self) -> &LiveCompositor {
        &self.compositor
    }

    /// Atlas layout.
    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    /// Active state.
    pub fn state(&self) -> AnimationState {
        self.clock.config().state
    }

    /// Whether playback is running.
    pub fn is_playing(&self) -> bool {
        self.clock.config().playing
    }

    /// Offset table.
    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    /// Presentation options.
    pub fn options(&self) -> &PreviewOptions {
        self.compositor.options()
    }

    fn reconfigure(&mut self, edit: impl FnOnce(&mut ClockConfig)) {
        let mut cfg = *self.clock.config();
        edit(&mut cfg);
        self.clock.reconfigure(cfg);
    }

    /// Replace the atlas layout.
    pub fn set_grid(&mut self, grid: GridConfig) {
        self.grid = grid;
        self.reconfigure(|c| c.cols = grid.cols);
    }

    /// Flip between playing and paused.
    pub fn toggle_playing(&mut self) {
        let playing = !self.is_playing();
        self.set_playing(playing);
    }

    /// Start or pause playback.
    pub fn set_playing(&mut self, playing: bool) {
        self.reconfigure(|c| c.playing = playing);
    }

    /// Change the frame rate.
    pub fn set_fps(&mut self, fps: f64) {
        self.reconfigure(|c| c.fps = fps);
    }

    /// Switch the active state; the clock starts a transition on the next tick.
    pub fn set_state(&mut self, state: AnimationState) {
        self.reconfigure(|c| c.state = state);
    }

    /// Change the transition easing curve.
    pub fn set_easing(&mut self, ease: Ease) {
        self.reconfigure(|c| c.ease = ease);
    }

    /// Change the transition length.
    pub fn set_transition_ms(&mut self, ms: f64) {
        self.reconfigure(|c| c.transition_ms = ms);
    }

    /// Pause, then move one frame in `dir` with wraparound.
    pub fn step(&mut self, dir: StepDirection) {
        self.set_playing(false);
        let cols = self.grid.cols;
        if cols == 0 {
            return;
        }
        let frame = self.clock.current_frame();
        let next = match dir {
            StepDirection::Forward => (frame + 1) % cols,
            StepDirection::Backward => (frame + cols - 1) % cols,
        };
        self.clock.set_manual_frame(i64::from(next));
    }

    /// Next zoom level, wrapping to 1 after the maximum.
    pub fn cycle_zoom(&mut self) {
        let opts = self.compositor.options_mut();
        opts.zoom = opts.zoom.next();
    }

    /// Next background theme.
    pub fn cycle_theme(&mut self) {
        let opts = self.compositor.options_mut();
        opts.theme = opts.theme.next();
    }

    /// Show or hide the alignment guides.
    pub fn toggle_grid(&mut self) {
        let opts = self.compositor.options_mut();
        opts.show_grid = !opts.show_grid;
    }

    /// Shift the offset of `state` by `(dx, dy)` pixels.
    pub fn nudge_offset(&mut self, state: AnimationState, dx: i32, dy: i32) -> FrameOffset {
        let offset = self.offsets.nudge(state, dx, dy);
        tracing::debug!(%state, x = offset.x, y = offset.y, "offset nudged");
        offset
    }

    /// Replace the offset of `state`.
    pub fn set_offset(&mut self, state: AnimationState, offset: FrameOffset) {
        self.offsets.set(state, offset);
    }

    /// Zero the offset of `state` only.
    pub fn reset_offset(&mut self, state: AnimationState) {
        self.offsets.reset(state);
    }

    /// Zero every offset.
    pub fn reset_all_offsets(&mut self) {
        self.offsets.reset_all();
    }

    /// Readout for the current tick.
    pub fn status(&self) -> PreviewStatus {
        let state = self.state();
        PreviewStatus {
            frame: self.clock.current_frame(),
            row: state.row(),
            offset: self.offsets.get(state),
            state,
            playing: self.is_playing(),
            zoom: self.options().zoom.get(),
        }
    }

    /// Export request for the active state with value copies of the current settings.
    pub fn export_request(&self, quality: ExportQuality) -> ExportRequest {
        let state = self.state();
        ExportRequest {
            grid: self.grid,
            state,
            offset: self.offsets.get(state),
            quality,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
