//! Drawing surfaces, compositors and the render entry points.

pub mod background;
pub(crate) mod blur;
pub mod calendar;
pub mod compose;
pub(crate) mod composite;
/// `vello_cpu` raster surface.
pub mod cpu;
pub mod overlay;
/// One-shot renders and parallel preset export.
pub mod pipeline;
/// Interactive preview state machine.
pub mod preview;
/// Display-list surface.
pub mod recording;
pub mod surface;
