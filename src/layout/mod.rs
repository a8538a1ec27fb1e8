//! Resolution-independent geometry and text fitting.

/// Calendar and overlay geometry for one surface size.
pub mod geometry;
/// Title fitting and tracked character placement.
pub mod typography;
/// Greedy word wrapping.
pub mod wrap;
