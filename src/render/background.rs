//! Flat fill, cover-fit photo and the darkening overlays that keep text readable on it.

use crate::assets::decode::BackgroundImage;
use crate::foundation::core::{Point, Rect, Rgb8, Rgba, SurfaceSize};
use crate::foundation::error::CalwallResult;
use crate::render::surface::{ColorStop, DrawSurface, Paint};

pub const VIGNETTE_INNER: Rgba = Rgba::black(0.10);
pub const VIGNETTE_OUTER: Rgba = Rgba::black(0.40);
/// Inner vignette radius as a fraction of `min(w, h)`.
pub const VIGNETTE_INNER_FRAC: f64 = 0.25;
/// Outer vignette radius as a fraction of `max(w, h)`.
pub const VIGNETTE_OUTER_FRAC: f64 = 0.9;
/// Bottom fade starts at this fraction of the height.
pub const FADE_START_FRAC: f64 = 0.7;
pub const FADE_END: Rgba = Rgba::black(0.18);

/// What sits under the calendar.
#[derive(Clone, Copy, Debug)]
pub struct BackgroundLayer<'a> {
    pub image: Option<&'a BackgroundImage>,
    /// The previous image and how far `image` has faded in over it, `0..=1`.
    pub fade_from: Option<(&'a BackgroundImage, f32)>,
    pub fill: Rgb8,
}

impl<'a> BackgroundLayer<'a> {
    pub fn new(image: Option<&'a BackgroundImage>, fill: Rgb8) -> Self {
        Self {
            image,
            fade_from: None,
            fill,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Destination rect that scales `image` uniformly to cover `surface`, centered.
pub fn cover_fit(image: SurfaceSize, surface: SurfaceSize) -> Rect {
    let (sw, sh) = (surface.width_f64(), surface.height_f64());
    let (iw, ih) = (image.width_f64(), image.height_f64());
    let scale = (sw / iw).max(sh / ih);
    let (dw, dh) = (iw * scale, ih * scale);
    let x0 = (sw - dw) / 2.0;
    let y0 = (sh - dh) / 2.0;
    Rect::new(x0, y0, x0 + dw, y0 + dh)
}

pub fn vignette_paint(size: SurfaceSize) -> Paint {
    let (w, h) = (size.width_f64(), size.height_f64());
    Paint::Radial {
        center: Point::new(w / 2.0, h / 2.0),
        r0: VIGNETTE_INNER_FRAC * w.min(h),
        r1: VIGNETTE_OUTER_FRAC * w.max(h),
        stops: vec![
            ColorStop {
                offset: 0.0,
                color: VIGNETTE_INNER,
            },
            ColorStop {
                offset: 1.0,
                color: VIGNETTE_OUTER,
            },
        ],
    }
}

pub fn bottom_fade(size: SurfaceSize) -> (Rect, Paint) {
    let (w, h) = (size.width_f64(), size.height_f64());
    let top = FADE_START_FRAC * h;
    let paint = Paint::Linear {
        start: Point::new(0.0, top),
        end: Point::new(0.0, h),
        stops: vec![
            ColorStop {
                offset: 0.0,
                color: Rgba::TRANSPARENT,
            },
            ColorStop {
                offset: 1.0,
                color: FADE_END,
            },
        ],
    };
    (Rect::new(0.0, top, w, h), paint)
}

fn draw_cover<S: DrawSurface + ?Sized>(
    surface: &mut S,
    image: &BackgroundImage,
    opacity: f32,
) -> CalwallResult<()> {
    let dest = cover_fit(image.size(), surface.size());
    surface.draw_image(image, dest, opacity)
}

/// Fill, photo (with an optional cross-fade from the previous photo) and overlays.
///
/// Without any photo the surface stays a flat fill.
pub fn draw_background<S: DrawSurface + ?Sized>(
    surface: &mut S,
    layer: &BackgroundLayer<'_>,
) -> CalwallResult<()> {
    let size = surface.size();
    surface.fill_rect(size.rect(), &Paint::Solid(layer.fill.with_alpha(1.0)))?;

    let mut drew_image = false;
    let fade = layer
        .fade_from
        .map(|(prev, t)| (prev, t.clamp(0.0, 1.0)))
        .filter(|(_, t)| *t < 1.0);
    match (fade, layer.image) {
        (Some((prev, t)), Some(image)) => {
            draw_cover(surface, prev, 1.0)?;
            draw_cover(surface, image, t)?;
            drew_image = true;
        }
        (Some((prev, t)), None) => {
            draw_cover(surface, prev, 1.0 - t)?;
            drew_image = true;
        }
        (None, Some(image)) => {
            draw_cover(surface, image, 1.0)?;
            drew_image = true;
        }
        (None, None) => {}
    }
    if !drew_image {
        return Ok(());
    }

    surface.fill_rect(size.rect(), &vignette_paint(size))?;
    let (rect, paint) = bottom_fade(size);
    surface.fill_rect(rect, &paint)
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
