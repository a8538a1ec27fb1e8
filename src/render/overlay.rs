//! Free-form user text wrapped into the safe-area and anchored in one of nine zones.

use crate::config::model::{FontPair, HAnchor, TextOverlay, VAnchor};
use crate::foundation::core::{Point, Rgb8, Rgba, Vec2};
use crate::foundation::error::CalwallResult;
use crate::layout::geometry::Layout;
use crate::layout::wrap::wrap_text;
use crate::render::surface::{DrawSurface, Shadow, TextAlign, TextBaseline, TextStyle};
use crate::text::measure::{FontSpec, FontWeight};

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_EM: f64 = 1.3;

/// Stronger than the calendar shadow; overlay text sits on arbitrary parts of the photo.
pub fn overlay_shadow(height: f64) -> Shadow {
    Shadow {
        color: Rgba::black(0.55),
        blur: 0.008 * height,
        offset: Vec2::new(0.0, 0.002 * height),
    }
}

/// Family the overlay draws with.
pub fn overlay_family<'a>(overlay: &'a TextOverlay, fonts: &'a FontPair) -> &'a str {
    if overlay.use_typography_font {
        &fonts.title
    } else {
        overlay.font.trim()
    }
}

/// Placed lines of an overlay, top baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayBlock {
    pub lines: Vec<String>,
    pub font: FontSpec,
    pub x: f64,
    pub top: f64,
    pub line_height: f64,
    pub align: TextAlign,
}

/// Wrap and anchor `overlay` inside the safe-area of `layout`.
///
/// Blocks always grow downward from `top`, whatever the vertical anchor.
pub fn plan_overlay<S: DrawSurface + ?Sized>(
    surface: &mut S,
    overlay: &TextOverlay,
    layout: &Layout,
    fonts: &FontPair,
) -> CalwallResult<OverlayBlock> {
    let size_px = layout.overlay_base_size * overlay.font_size;
    let font = FontSpec::new(overlay_family(overlay, fonts), size_px, FontWeight::MEDIUM);
    let safe = layout.overlay_safe_area;

    let lines = wrap_text(&overlay.content, safe.width(), |s| {
        surface.measure_text(s, &font)
    })?;
    let line_height = LINE_HEIGHT_EM * size_px;
    let total = line_height * lines.len() as f64;

    let top = match overlay.position.v_anchor() {
        VAnchor::Top => safe.y0,
        VAnchor::Bottom => safe.y1 - total,
        VAnchor::Middle => (layout.size.height_f64() - total) / 2.0,
    };
    let (x, align) = match overlay.position.h_anchor() {
        HAnchor::Left => (safe.x0, TextAlign::Left),
        HAnchor::Right => (safe.x1, TextAlign::Right),
        HAnchor::Center => (layout.size.width_f64() / 2.0, TextAlign::Center),
    };

    Ok(OverlayBlock {
        lines,
        font,
        x,
        top,
        line_height,
        align,
    })
}

pub fn draw_overlay<S: DrawSurface + ?Sized>(
    surface: &mut S,
    overlay: &TextOverlay,
    layout: &Layout,
    fonts: &FontPair,
    color: Rgb8,
) -> CalwallResult<()> {
    let block = plan_overlay(surface, overlay, layout, fonts)?;
    let style = TextStyle {
        font: block.font.clone(),
        color: color.with_alpha(1.0),
        opacity: 1.0,
        align: block.align,
        baseline: TextBaseline::Top,
        shadow: Some(overlay_shadow(layout.size.height_f64())),
    };
    for (i, line) in block.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = block.top + block.line_height * i as f64;
        surface.fill_text(line, Point::new(block.x, y), &style)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
