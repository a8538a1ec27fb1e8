//! Auto-contrast: average perceptual luminance of the canvas center and a light/dark decision.

use crate::foundation::core::{Rgb8, SurfaceSize};
use crate::foundation::error::{CalwallError, CalwallResult};

/// Only every n-th pixel of the sampled region contributes to the average.
pub const SAMPLE_STRIDE: usize = 4;
/// Default cut between light and dark text.
pub const DEFAULT_LUMINANCE_THRESHOLD: f64 = 0.5;

/// sRGB channel (0..=1) to linear light.
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance of an 8-bit sRGB color.
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    let lin = |c: u8| srgb_to_linear(f64::from(c) / 255.0);
    0.2126 * lin(r) + 0.7152 * lin(g) + 0.0722 * lin(b)
}

/// Pixel bounds `(x0, y0, x1, y1)` of the center 50% x 50% of a surface.
pub fn center_region(size: SurfaceSize) -> (u32, u32, u32, u32) {
    let x0 = size.width / 4;
    let y0 = size.height / 4;
    let x1 = (x0 + (size.width / 2).max(1)).min(size.width);
    let y1 = (y0 + (size.height / 2).max(1)).min(size.height);
    (x0, y0, x1, y1)
}

/// Light or dark text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTone {
    Light,
    Dark,
}

impl TextTone {
    pub fn color(self) -> Rgb8 {
        match self {
            Self::Light => Rgb8::WHITE,
            Self::Dark => Rgb8::BLACK,
        }
    }
}

/// Below `threshold` the background is dark and wants light text.
pub fn tone_for(luminance: f64, threshold: f64) -> TextTone {
    if luminance < threshold {
        TextTone::Light
    } else {
        TextTone::Dark
    }
}

/// Outcome of one analysis pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastReading {
    pub luminance: f64,
    pub tone: TextTone,
}

impl ContrastReading {
    pub fn text_color(&self) -> Rgb8 {
        self.tone.color()
    }
}

/// Mean luminance over every [`SAMPLE_STRIDE`]-th pixel of the center region of an RGBA8 frame.
///
/// Alpha is ignored; frames handed in here are opaque composites.
pub fn average_luminance(rgba: &[u8], size: SurfaceSize) -> CalwallResult<f64> {
    let expected = size.pixel_count().saturating_mul(4);
    if rgba.len() != expected {
        return Err(CalwallError::render(format!(
            "luminance sample expects {expected} bytes for {size}, got {}",
            rgba.len()
        )));
    }

    let (x0, y0, x1, y1) = center_region(size);
    let stride = size.width as usize * 4;
    let mut sum = 0.0f64;
    let mut count = 0usize;
    let mut n = 0usize;
    for y in y0..y1 {
        let row = &rgba[y as usize * stride..(y as usize + 1) * stride];
        for x in x0..x1 {
            if n % SAMPLE_STRIDE == 0 {
                let i = x as usize * 4;
                sum += relative_luminance(row[i], row[i + 1], row[i + 2]);
                count += 1;
            }
            n += 1;
        }
    }

    if count == 0 {
        return Ok(0.0);
    }
    Ok(sum / count as f64)
}

#[tracing::instrument(skip(rgba))]
pub fn analyze_contrast(
    rgba: &[u8],
    size: SurfaceSize,
    threshold: f64,
) -> CalwallResult<ContrastReading> {
    let luminance = average_luminance(rgba, size)?;
    let tone = tone_for(luminance, threshold);
    tracing::debug!(luminance, ?tone, "contrast analyzed");
    Ok(ContrastReading { luminance, tone })
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/luminance.rs"]
mod tests;
