//! Interactive preview session wiring the clock to the compositor.

pub mod preview;
