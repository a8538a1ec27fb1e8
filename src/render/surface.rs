//! The drawing capability every compositor draws through.
//!
//! Each draw call carries its complete style. Surfaces keep no fill, shadow or alpha state
//! between calls, so one draw can never leak style into the next.

use crate::assets::decode::BackgroundImage;
use crate::foundation::core::{Point, Rect, Rgba, SurfaceSize, Vec2};
use crate::foundation::error::{CalwallError, CalwallResult};
use crate::text::measure::{FontSpec, TextMeasure};

/// One gradient stop; `offset` in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Fill style of a rectangle.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    /// Colors projected on the segment `start -> end`, padded beyond both ends.
    Linear {
        start: Point,
        end: Point,
        stops: Vec<ColorStop>,
    },
    /// Concentric radial gradient from radius `r0` to `r1`, padded inside and outside.
    Radial {
        center: Point,
        r0: f64,
        r1: f64,
        stops: Vec<ColorStop>,
    },
}

impl Paint {
    /// Straight-alpha color of the paint at `p`.
    pub fn color_at(&self, p: Point) -> Rgba {
        match self {
            Self::Solid(c) => *c,
            Self::Linear { start, end, stops } => {
                let d = *end - *start;
                let len2 = d.hypot2();
                let t = if len2 <= 0.0 {
                    0.0
                } else {
                    (p - *start).dot(d) / len2
                };
                sample_stops(stops, t)
            }
            Self::Radial {
                center,
                r0,
                r1,
                stops,
            } => {
                let dist = (p - *center).hypot();
                let span = r1 - r0;
                let t = if span <= 0.0 {
                    if dist >= *r1 { 1.0 } else { 0.0 }
                } else {
                    (dist - r0) / span
                };
                sample_stops(stops, t)
            }
        }
    }
}

fn sample_stops(stops: &[ColorStop], t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0) as f32;
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
            return a.color.lerp(b.color, local);
        }
    }
    last.color
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Which line of the text box `origin.y` names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    /// Top of the em box.
    Top,
}

/// Drop shadow behind a text draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    /// Blur extent in pixels; the gaussian sigma is half of it.
    pub blur: f64,
    pub offset: Vec2,
}

/// Complete style of one text draw.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Rgba,
    /// Multiplies the color alpha and the shadow.
    pub opacity: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub shadow: Option<Shadow>,
}

/// Rendered pixels, premultiplied RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub size: SurfaceSize,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(size: SurfaceSize, data: Vec<u8>) -> CalwallResult<Self> {
        if data.len() != size.pixel_count().saturating_mul(4) {
            return Err(CalwallError::render(format!(
                "frame buffer has {} bytes, expected {} for {size}",
                data.len(),
                size.pixel_count() * 4
            )));
        }
        Ok(Self { size, data })
    }

    /// Straight-alpha copy of the pixels.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Target of the compositors.
///
/// Implementations: [`crate::CpuSurface`] rasterizes, [`crate::RecordingSurface`] records a
/// display list for an interactive host.
pub trait DrawSurface {
    fn size(&self) -> SurfaceSize;

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> CalwallResult<f64>;

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> CalwallResult<()>;

    /// Draw `image` scaled into `dest`, clipped to the surface.
    fn draw_image(
        &mut self,
        image: &BackgroundImage,
        dest: Rect,
        opacity: f32,
    ) -> CalwallResult<()>;

    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle) -> CalwallResult<()>;

    /// Pixels drawn so far, if this surface has any.
    fn snapshot(&mut self) -> CalwallResult<Option<Frame>>;
}

/// Measures through a surface so layout helpers see the same widths the surface draws with.
pub struct SurfaceMeasure<'a, S: ?Sized>(pub &'a mut S);

impl<S: DrawSurface + ?Sized> TextMeasure for SurfaceMeasure<'_, S> {
    fn measure(&mut self, text: &str, font: &FontSpec) -> CalwallResult<f64> {
        self.0.measure_text(text, font)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
