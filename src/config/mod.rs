//! Per-wallpaper configuration and engine options.

/// Wallpaper configuration wire model and validation.
pub mod model;
/// Engine options and export presets.
pub mod opts;
