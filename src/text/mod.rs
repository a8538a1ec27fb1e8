//! Fonts, shaping and measurement.

/// Parley shaping into `vello_cpu` glyph runs.
pub mod engine;
/// Shared font registry with bounded readiness waits.
pub mod fonts;
pub mod measure;
