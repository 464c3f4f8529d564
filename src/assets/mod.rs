//! Atlas decoding and the load-state slot the preview polls.

pub mod atlas;
