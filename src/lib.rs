//! calwall composites a monthly calendar, its title and optional free text over a background
//! photo, and renders the result at any pixel size.
//!
//! Every position, size and font size is derived from the surface dimensions at draw time, so
//! the same [`WallpaperConfig`] over the same [`BackgroundImage`] yields the same composition
//! at preview size and at 4K.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: [`WallpaperConfig::validate`] rejects malformed values before any drawing
//! 2. **Fonts**: wait (bounded) for the families in a [`FontRegistry`], then fall back
//! 3. **Compose**: [`compose`] draws background, calendar and overlay onto a [`DrawSurface`]
//! 4. **Encode**: [`encode_png`] turns a [`CpuSurface`] frame into PNG bytes
//!
//! Two surfaces ship with the crate: [`CpuSurface`] rasterizes with `vello_cpu`, and
//! [`RecordingSurface`] records a display list for hosts that draw on their own.
//! [`PreviewSession`] drives interactive previews with stale-load protection and cross-fades.
#![forbid(unsafe_code)]

mod analysis;
mod assets;
mod calendar;
mod config;
mod encode;
mod foundation;
mod layout;
mod render;
mod text;

pub use analysis::luminance::{
    ContrastReading, DEFAULT_LUMINANCE_THRESHOLD, TextTone, analyze_contrast, average_luminance,
    relative_luminance,
};
pub use assets::decode::{
    BackgroundImage, DecodeLimits, MAX_ENCODED_BYTES, MAX_IMAGE_PIXELS, MAX_IMAGE_SIDE,
    decode_background, decode_background_with,
};
pub use calendar::dates::{
    DayCell, days_in_month, first_day_offset, format_header, month_cells, weekday_labels,
};
pub use config::model::{
    FONT_PAIR_DELIMITER, FontPair, HAnchor, HeaderFormat, OverlayPosition, TextOverlay, VAnchor,
    ViewMode, WallpaperConfig, WeekStart,
};
pub use config::opts::{ExportPreset, RenderOpts};
pub use encode::png::{encode_png, write_png_file};
pub use foundation::core::{Point, Rect, Rgb8, Rgba, SurfaceSize, Vec2};
pub use foundation::error::{CalwallError, CalwallResult};
pub use layout::geometry::{Layout, LayoutInput, ViewProfile, plan_layout};
pub use layout::typography::{Fit, TrackedLine, fit_to_width, layout_tracked};
pub use layout::wrap::wrap_text;
pub use render::background::{BackgroundLayer, cover_fit, draw_background};
pub use render::calendar::draw_calendar;
pub use render::compose::{Composed, Scene, TextColorChoice, compose, layout_for};
pub use render::cpu::CpuSurface;
pub use render::overlay::{OverlayBlock, draw_overlay, plan_overlay};
pub use render::pipeline::{
    ExportedWallpaper, RenderedWallpaper, export_presets, render_png, render_wallpaper,
    wait_for_fonts,
};
pub use render::preview::{LoadTicket, PreviewFrame, PreviewSession, PreviewState};
pub use render::recording::{DrawCommand, RecordingSurface};
pub use render::surface::{
    ColorStop, DrawSurface, Frame, Paint, Shadow, TextAlign, TextBaseline, TextStyle,
};
pub use text::engine::{ShapedLine, TextEngine};
pub use text::fonts::FontRegistry;
pub use text::measure::{FontSpec, FontWeight, MonospaceMeasure, TextMeasure};
