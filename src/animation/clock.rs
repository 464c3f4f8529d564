use crate::animation::{ease::Ease, state::AnimationState};

/// Playback parameters. Changing them goes through [`AnimationClock::reconfigure`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClockConfig {
    /// Whether frames advance on ticks.
    pub playing: bool,
    /// Target frame rate. Non-positive or non-finite values freeze advancement.
    pub fps: f64,
    /// Frames per atlas row.
    pub cols: u32,
    /// Active animation state.
    pub state: AnimationState,
    /// Length of the eased state-switch signal in milliseconds.
    pub transition_ms: f64,
    /// Curve applied to raw transition progress.
    pub ease: Ease,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            playing: true,
            fps: 8.0,
            cols: 4,
            state: AnimationState::default(),
            transition_ms: 0.0,
            ease: Ease::default(),
        }
    }
}

impl ClockConfig {
    /// Milliseconds between frame advances; infinite when `fps` is unusable.
    pub fn interval_ms(&self) -> f64 {
        if self.fps.is_finite() && self.fps > 0.0 {
            1000.0 / self.fps
        } else {
            f64::INFINITY
        }
    }

    fn restarts_timing(&self, other: &ClockConfig) -> bool {
        self.playing != other.playing
            || self.fps != other.fps
            || self.cols != other.cols
            || self.state != other.state
            || self.transition_ms != other.transition_ms
    }
}

/// Everything the clock remembers between ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockState {
    /// Current frame in `[0, cols - 1]`.
    pub frame: u32,
    /// Fraction of the current frame interval already elapsed, `[0, 1]`.
    pub frame_progress: f64,
    /// Uneased transition progress, `[0, 1]`. `1` when no transition is running.
    pub raw_transition: f64,
    /// State that was active before the running transition; equals the active state once it closes.
    pub previous_state: AnimationState,
    /// State seen by the most recent tick, used to detect switches.
    pub observed_state: AnimationState,
    /// Timestamp the frame cadence is measured from. `None` until the first tick.
    pub last_advance_ms: Option<f64>,
    /// Timestamp the running transition started at.
    pub transition_start_ms: Option<f64>,
}

impl ClockState {
    /// A clock resting on frame 0 of `state` with no transition running.
    pub fn new(state: AnimationState) -> Self {
        Self {
            frame: 0,
            frame_progress: 0.0,
            raw_transition: 1.0,
            previous_state: state,
            observed_state: state,
            last_advance_ms: None,
            transition_start_ms: None,
        }
    }

    /// `true` while a state switch is still blending.
    pub fn in_transition(&self) -> bool {
        self.transition_start_ms.is_some()
    }
}

/// Read-only view of the clock after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockSnapshot {
    /// Current frame index.
    pub frame: u32,
    /// Progress through the current frame interval.
    pub frame_progress: f64,
    /// Eased transition progress.
    pub transition_progress: f64,
    /// State active before the running transition.
    pub previous_state: AnimationState,
}

/// Pure clock step: the state after a tick at `now_ms`.
///
/// Advances at most one frame per call and re-anchors the cadence to `now - (elapsed % interval)`
/// so tick jitter never accumulates into drift.
pub fn advance(prev: &ClockState, cfg: &ClockConfig, now_ms: f64) -> ClockState {
    let mut next = *prev;
    next.frame = prev.frame.min(cfg.cols.saturating_sub(1));

    let interval = cfg.interval_ms();
    let anchor = prev.last_advance_ms.unwrap_or(now_ms);
    let elapsed = (now_ms - anchor).max(0.0);
    next.last_advance_ms = Some(anchor);

    next.frame_progress = if cfg.playing && interval.is_finite() {
        (elapsed / interval).clamp(0.0, 1.0)
    } else {
        0.0
    };

    if interval.is_finite() && elapsed >= interval {
        if cfg.playing && cfg.cols > 0 {
            next.frame = (next.frame + 1) % cfg.cols;
        }
        next.last_advance_ms = Some(now_ms - elapsed % interval);
    }

    if cfg.state != prev.observed_state {
        tracing::debug!(from = %prev.observed_state, to = %cfg.state, "state transition started");
        next.observed_state = cfg.state;
        next.transition_start_ms = Some(now_ms);
        next.raw_transition = 0.0;
    }

    if let Some(start) = next.transition_start_ms {
        let raw = if cfg.transition_ms > 0.0 {
            ((now_ms - start) / cfg.transition_ms).clamp(0.0, 1.0)
        } else {
            1.0
        };
        next.raw_transition = raw;
        if raw >= 1.0 {
            tracing::trace!(state = %cfg.state, "state transition closed");
            next.transition_start_ms = None;
            next.previous_state = cfg.state;
        }
    }

    next
}

/// Real-time animation clock driven by an external per-display-frame tick.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    cfg: ClockConfig,
    state: ClockState,
}

impl AnimationClock {
    /// New clock at frame 0 of `cfg.state`.
    pub fn new(cfg: ClockConfig) -> Self {
        Self {
            state: ClockState::new(cfg.state),
            cfg,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ClockConfig {
        &self.cfg
    }

    /// Internal state, mostly for diagnostics.
    pub fn state(&self) -> &ClockState {
        &self.state
    }

    /// Swap configuration. Timing-relevant changes restart the frame cadence on the next tick; a
    /// state change is picked up by that tick as a transition.
    pub fn reconfigure(&mut self, cfg: ClockConfig) {
        if self.cfg.restarts_timing(&cfg) {
            self.state.last_advance_ms = None;
        }
        self.state.frame = self.state.frame.min(cfg.cols.saturating_sub(1));
        self.cfg = cfg;
    }

    /// Advance to `now_ms` (milliseconds on any monotonic timeline).
    pub fn tick(&mut self, now_ms: f64) -> ClockSnapshot {
        self.state = advance(&self.state, &self.cfg, now_ms);
        self.snapshot()
    }

    /// Seek to frame `n`, clamped to `[0, cols - 1]`. Transition state is left alone.
    pub fn set_manual_frame(&mut self, n: i64) {
        let max = i64::from(self.cfg.cols.saturating_sub(1));
        self.state.frame = n.clamp(0, max) as u32;
        self.state.frame_progress = 0.0;
    }

    /// Current frame index.
    pub fn current_frame(&self) -> u32 {
        self.state.frame
    }

    /// Progress through the current frame interval.
    pub fn frame_progress(&self) -> f64 {
        self.state.frame_progress
    }

    /// Eased transition progress.
    pub fn transition_progress(&self) -> f64 {
        self.cfg.ease.apply(self.state.raw_transition)
    }

    /// State active before the running transition.
    pub fn previous_state(&self) -> AnimationState {
        self.state.previous_state
    }

    /// Read-only view of the current values.
    pub fn snapshot(&self) -> ClockSnapshot {
        ClockSnapshot {
            frame: self.state.frame,
            frame_progress: self.state.frame_progress,
            transition_progress: self.transition_progress(),
            previous_state: self.state.previous_state,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
