//! The one composition algorithm every surface runs: background, calendar, overlay.

use crate::analysis::luminance::{ContrastReading, analyze_contrast};
use crate::config::model::{FontPair, WallpaperConfig};
use crate::foundation::core::Rgb8;
use crate::foundation::error::CalwallResult;
use crate::layout::geometry::{Layout, LayoutInput, plan_layout};
use crate::render::background::{BackgroundLayer, draw_background};
use crate::render::calendar::draw_calendar;
use crate::render::overlay::draw_overlay;
use crate::render::surface::DrawSurface;

/// Where the text color of a render comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextColorChoice {
    Fixed(Rgb8),
    /// Analyze the drawn background; `fallback` applies when there is nothing to analyze.
    Auto { threshold: f64, fallback: Rgb8 },
}

impl TextColorChoice {
    pub fn for_config(config: &WallpaperConfig, threshold: f64) -> CalwallResult<Self> {
        let configured = config.text_rgb()?;
        Ok(if config.auto_text_color {
            Self::Auto {
                threshold,
                fallback: configured,
            }
        } else {
            Self::Fixed(configured)
        })
    }
}

/// Inputs of one composition.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    pub config: &'a WallpaperConfig,
    pub background: BackgroundLayer<'a>,
    pub text_color: TextColorChoice,
}

/// What a composition decided along the way.
#[derive(Clone, Debug, PartialEq)]
pub struct Composed {
    pub layout: Layout,
    pub text_color: Rgb8,
    pub contrast: Option<ContrastReading>,
}

pub fn layout_for(config: &WallpaperConfig, surface: &(impl DrawSurface + ?Sized)) -> Layout {
    let (offset_x, offset_y) = config.clamped_offsets();
    plan_layout(&LayoutInput {
        size: surface.size(),
        view_mode: config.view_mode,
        scale: config.calendar_scale,
        offset_x,
        offset_y,
    })
}

/// Draw `scene` onto `surface`.
///
/// The config is validated before the first draw. Auto text color samples the surface right
/// after the background; surfaces without pixels keep the configured color.
pub fn compose<S: DrawSurface + ?Sized>(
    surface: &mut S,
    scene: &Scene<'_>,
) -> CalwallResult<Composed> {
    let config = scene.config;
    config.validate()?;
    let fonts: FontPair = config.fonts()?;
    let layout = layout_for(config, &*surface);

    draw_background(surface, &scene.background)?;

    let mut contrast = None;
    let text_color = match scene.text_color {
        TextColorChoice::Fixed(c) => c,
        TextColorChoice::Auto {
            threshold,
            fallback,
        } => {
            if scene.background.has_image()
                && let Some(frame) = surface.snapshot()?
            {
                let reading = analyze_contrast(&frame.data, frame.size, threshold)?;
                tracing::debug!(luminance = reading.luminance, "auto text color");
                contrast = Some(reading);
                reading.text_color()
            } else {
                fallback
            }
        }
    };

    draw_calendar(surface, config, &layout, &fonts, text_color)?;
    if let Some(overlay) = config.active_overlay() {
        draw_overlay(surface, overlay, &layout, &fonts, text_color)?;
    }

    Ok(Composed {
        layout,
        text_color,
        contrast,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
