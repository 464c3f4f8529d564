//! Frame timing: easing curves, animation states and the tick-driven clock.

/// Frame cadence, drift resync and state-switch transitions.
pub mod clock;
/// Easing curves for transition progress.
pub mod ease;
/// Animation states, their atlas rows and per-state offsets.
pub mod state;
