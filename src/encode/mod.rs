//! Encoders for rendered frames.

/// PNG output via the `image` crate.
pub mod png;
