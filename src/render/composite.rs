//! Premultiplied RGBA8 compositing on raw frame buffers.

use crate::foundation::core::{Rect, SurfaceSize};
use crate::foundation::error::{CalwallError, CalwallResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8, unit_to_u8};

pub type PremulRgba8 = [u8; 4];

/// Integer pixel bounds, half-open, already clipped to a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    /// Pixels whose centers fall inside `rect`, clipped to `size`.
    pub fn from_rect(rect: Rect, size: SurfaceSize) -> Self {
        let clamp_x = |v: f64| v.round().clamp(0.0, size.width_f64()) as u32;
        let clamp_y = |v: f64| v.round().clamp(0.0, size.height_f64()) as u32;
        let r = rect.abs();
        Self {
            x0: clamp_x(r.x0),
            y0: clamp_y(r.y0),
            x1: clamp_x(r.x1),
            y1: clamp_y(r.y1),
        }
    }

    /// Smallest pixel box covering `rect`, clipped to `size`.
    pub fn covering(rect: Rect, size: SurfaceSize) -> Self {
        let r = rect.abs();
        Self {
            x0: r.x0.floor().clamp(0.0, size.width_f64()) as u32,
            y0: r.y0.floor().clamp(0.0, size.height_f64()) as u32,
            x1: r.x1.ceil().clamp(0.0, size.width_f64()) as u32,
            y1: r.y1.ceil().clamp(0.0, size.height_f64()) as u32,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }
}

pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = unit_to_u8(opacity);
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

fn check_len(buf: &[u8], size: SurfaceSize, what: &str) -> CalwallResult<()> {
    if buf.len() != size.pixel_count().saturating_mul(4) {
        return Err(CalwallError::render(format!(
            "{what} expects a {size} rgba8 buffer, got {} bytes",
            buf.len()
        )));
    }
    Ok(())
}

/// Composite `src` over `dst` inside `region`; both buffers cover the whole surface.
pub fn over_region_in_place(
    dst: &mut [u8],
    src: &[u8],
    size: SurfaceSize,
    region: PixelRect,
    opacity: f32,
) -> CalwallResult<()> {
    check_len(dst, size, "over_region_in_place dst")?;
    check_len(src, size, "over_region_in_place src")?;
    let stride = size.width as usize * 4;
    for y in region.y0..region.y1 {
        let row = y as usize * stride;
        let (a, b) = (row + region.x0 as usize * 4, row + region.x1 as usize * 4);
        for (d, s) in dst[a..b].chunks_exact_mut(4).zip(src[a..b].chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

/// Composite a per-pixel color function over `dst` inside `region`.
pub fn over_with_in_place(
    dst: &mut [u8],
    size: SurfaceSize,
    region: PixelRect,
    mut color: impl FnMut(u32, u32) -> PremulRgba8,
) -> CalwallResult<()> {
    check_len(dst, size, "over_with_in_place")?;
    let stride = size.width as usize * 4;
    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            let i = y as usize * stride + x as usize * 4;
            let d = &mut dst[i..i + 4];
            let out = over([d[0], d[1], d[2], d[3]], color(x, y), 1.0);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
