//! Offline export: slicing frames out of the atlas and encoding them to files.

/// GIF and PNG encoding plus output writing.
pub mod encode;
/// Frame slicing at export resolution.
pub mod slicer;
