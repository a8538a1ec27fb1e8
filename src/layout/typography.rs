//! Shrink-to-fit sizing and per-glyph tracked placement of single-line text.

use crate::foundation::error::CalwallResult;
use crate::text::measure::{FontSpec, TextMeasure};

/// Extra letter-spacing as a fraction of the font size.
pub const TRACKING_EM: f64 = 0.055;
/// Text fits when its tracked width is at most this fraction of the available width.
pub const FIT_SLACK: f64 = 0.96;
/// Size decrement of the shrink loop.
pub const SHRINK_STEP_PX: f64 = 2.0;

pub fn tracking_for(size_px: f64) -> f64 {
    TRACKING_EM * size_px
}

/// Result of [`fit_to_width`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    pub size_px: f64,
    pub tracking_px: f64,
    /// Tracked width at the chosen size.
    pub width_px: f64,
}

/// One char of a tracked line and the x of its left edge.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedChar {
    pub text: String,
    pub x: f64,
    pub advance: f64,
}

/// A line laid out char by char around a center.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedLine {
    pub chars: Vec<PlacedChar>,
    pub width: f64,
}

/// Per-char advances of `text`; the tracked width adds `tracking * (n - 1)`.
fn char_advances(
    measure: &mut dyn TextMeasure,
    text: &str,
    font: &FontSpec,
) -> CalwallResult<Vec<(String, f64)>> {
    let mut out = Vec::with_capacity(text.len());
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let s = c.encode_utf8(&mut buf);
        let w = measure.measure(s, font)?;
        out.push((s.to_string(), w));
    }
    Ok(out)
}

fn total_width(advances: &[(String, f64)], tracking: f64) -> f64 {
    let glyphs: f64 = advances.iter().map(|(_, w)| *w).sum();
    let gaps = advances.len().saturating_sub(1) as f64;
    glyphs + tracking * gaps
}

/// Sum of per-char widths plus tracking between chars.
pub fn tracked_width(
    measure: &mut dyn TextMeasure,
    text: &str,
    font: &FontSpec,
    tracking: f64,
) -> CalwallResult<f64> {
    Ok(total_width(&char_advances(measure, text, font)?, tracking))
}

/// Shrink `font.size_px` in [`SHRINK_STEP_PX`] steps until the tracked text fits
/// `FIT_SLACK * max_width` or the size reaches `min_size`.
///
/// The returned size is never below `min_size`.
pub fn fit_to_width(
    measure: &mut dyn TextMeasure,
    text: &str,
    font: &FontSpec,
    max_width: f64,
    min_size: f64,
) -> CalwallResult<Fit> {
    let limit = FIT_SLACK * max_width;
    let mut size = font.size_px.max(min_size);
    loop {
        let tracking = tracking_for(size);
        let width = tracked_width(measure, text, &font.with_size(size), tracking)?;
        if width <= limit || size <= min_size {
            return Ok(Fit {
                size_px: size,
                tracking_px: tracking,
                width_px: width,
            });
        }
        size = (size - SHRINK_STEP_PX).max(min_size);
    }
}

/// Place each char of `text` so the tracked line is centered on `center_x`.
///
/// Each char advances by its own measured width plus `tracking`, so mixed-width alphabets
/// stay evenly tracked.
pub fn layout_tracked(
    measure: &mut dyn TextMeasure,
    text: &str,
    font: &FontSpec,
    tracking: f64,
    center_x: f64,
) -> CalwallResult<TrackedLine> {
    let advances = char_advances(measure, text, font)?;
    let width = total_width(&advances, tracking);
    let mut x = center_x - width / 2.0;
    let chars = advances
        .into_iter()
        .map(|(text, advance)| {
            let placed = PlacedChar { text, x, advance };
            x += advance + tracking;
            placed
        })
        .collect();
    Ok(TrackedLine { chars, width })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/typography.rs"]
mod tests;
