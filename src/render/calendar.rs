//! Month title, weekday labels and date numbers.

use crate::calendar::dates::{format_header, month_cells, weekday_labels};
use crate::config::model::{FontPair, WallpaperConfig};
use crate::foundation::core::{Point, Rgb8, Rgba, Vec2};
use crate::foundation::error::CalwallResult;
use crate::layout::geometry::Layout;
use crate::layout::typography::{fit_to_width, layout_tracked};
use crate::render::surface::{
    DrawSurface, Shadow, SurfaceMeasure, TextAlign, TextBaseline, TextStyle,
};
use crate::text::measure::{FontSpec, FontWeight};

pub const WEEKDAY_OPACITY: f32 = 0.8;

/// Soft shadow under all calendar text, proportional to the surface height.
pub fn calendar_shadow(height: f64) -> Shadow {
    Shadow {
        color: Rgba::black(0.30),
        blur: 0.004 * height,
        offset: Vec2::new(0.0, 0.0015 * height),
    }
}

fn style(font: FontSpec, color: Rgb8, opacity: f32, align: TextAlign, shadow: Shadow) -> TextStyle {
    TextStyle {
        font,
        color: color.with_alpha(1.0),
        opacity,
        align,
        baseline: TextBaseline::Alphabetic,
        shadow: Some(shadow),
    }
}

/// Draw the calendar block of `config` at the positions `layout` computed.
pub fn draw_calendar<S: DrawSurface + ?Sized>(
    surface: &mut S,
    config: &WallpaperConfig,
    layout: &Layout,
    fonts: &FontPair,
    color: Rgb8,
) -> CalwallResult<()> {
    let shadow = calendar_shadow(layout.size.height_f64());

    let title = format_header(config.year, config.month, config.header_format)?;
    let title_font = FontSpec::new(&fonts.title, layout.title_size, FontWeight::SEMI_BOLD);
    let fit = fit_to_width(
        &mut SurfaceMeasure(&mut *surface),
        &title,
        &title_font,
        layout.title_max_width,
        layout.title_min_size,
    )?;
    let title_font = title_font.with_size(fit.size_px);
    let line = layout_tracked(
        &mut SurfaceMeasure(&mut *surface),
        &title,
        &title_font,
        fit.tracking_px,
        layout.title_anchor.x,
    )?;
    let title_style = style(title_font, color, 1.0, TextAlign::Left, shadow);
    for ch in &line.chars {
        surface.fill_text(&ch.text, Point::new(ch.x, layout.title_anchor.y), &title_style)?;
    }

    let label_style = style(
        FontSpec::new(&fonts.body, layout.label_size, FontWeight::MEDIUM),
        color,
        WEEKDAY_OPACITY,
        TextAlign::Center,
        shadow,
    );
    for (col, label) in weekday_labels(config.week_start).iter().enumerate() {
        let x = layout.column_center_x(col as u8);
        surface.fill_text(label, Point::new(x, layout.weekday_baseline_y), &label_style)?;
    }

    let date_style = style(
        FontSpec::new(&fonts.body, layout.date_size, FontWeight::NORMAL),
        color,
        1.0,
        TextAlign::Center,
        shadow,
    );
    for cell in month_cells(config.year, config.month, config.week_start)? {
        let origin = Point::new(layout.column_center_x(cell.col), layout.row_baseline_y(cell.row));
        surface.fill_text(&cell.day.to_string(), origin, &date_style)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/calendar.rs"]
mod tests;
