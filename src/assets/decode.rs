//! Background bitmap intake with size limits checked before any pixel is decoded.

use std::io::Cursor;
use std::sync::Arc;

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{CalwallError, CalwallResult};

/// Largest accepted encoded buffer.
pub const MAX_ENCODED_BYTES: usize = 5 * 1024 * 1024;
/// Largest accepted width or height.
pub const MAX_IMAGE_SIDE: u32 = 8192;
/// Largest accepted decoded pixel count.
pub const MAX_IMAGE_PIXELS: u64 = 50_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_bytes: usize,
    pub max_side: u32,
    pub max_pixels: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_bytes: MAX_ENCODED_BYTES,
            max_side: MAX_IMAGE_SIDE,
            max_pixels: MAX_IMAGE_PIXELS,
        }
    }
}

impl DecodeLimits {
    pub fn check_dimensions(&self, width: u32, height: u32) -> CalwallResult<()> {
        if width == 0 || height == 0 {
            return Err(CalwallError::dimensions(width, height, "empty image"));
        }
        if width > self.max_side || height > self.max_side {
            return Err(CalwallError::dimensions(
                width,
                height,
                format!("max {} px per side", self.max_side),
            ));
        }
        if u64::from(width) * u64::from(height) > self.max_pixels {
            return Err(CalwallError::dimensions(
                width,
                height,
                format!("max {} pixels", self.max_pixels),
            ));
        }
        Ok(())
    }
}

/// Decoded straight-alpha RGBA8 background. Cheap to clone; exports share the pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct BackgroundImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl BackgroundImage {
    /// Wrap an already decoded bitmap, applying the default limits.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> CalwallResult<Self> {
        DecodeLimits::default().check_dimensions(width, height)?;
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CalwallError::dimensions(width, height, "buffer size overflow"))?;
        if rgba8.len() != expected {
            return Err(CalwallError::decode(format!(
                "rgba8 buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize {
            width: self.width,
            height: self.height,
        }
    }

    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// Identity of the pixel buffer; clones share it.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.rgba8) as usize
    }

    pub fn same_pixels(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.rgba8, &other.rgba8)
    }

    pub fn to_premul(&self) -> Vec<u8> {
        let mut out = self.rgba8.as_ref().clone();
        premultiply_rgba8_in_place(&mut out);
        out
    }
}

/// Decode an encoded background (PNG, JPEG, WebP, ...) with the default limits.
pub fn decode_background(bytes: &[u8]) -> CalwallResult<BackgroundImage> {
    decode_background_with(bytes, &DecodeLimits::default())
}

#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_background_with(
    bytes: &[u8],
    limits: &DecodeLimits,
) -> CalwallResult<BackgroundImage> {
    if bytes.len() > limits.max_bytes {
        return Err(CalwallError::ImageTooLarge {
            bytes: bytes.len(),
            max: limits.max_bytes,
        });
    }

    let (width, height) = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CalwallError::decode(format!("read image header: {e}")))?
        .into_dimensions()
        .map_err(|e| CalwallError::decode(format!("read image header: {e}")))?;
    limits.check_dimensions(width, height)?;

    let decoded = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CalwallError::decode(format!("read image: {e}")))?
        .decode()
        .map_err(|e| CalwallError::decode(format!("decode image: {e}")))?;
    let rgba = decoded.to_rgba8();
    let (w, h) = rgba.dimensions();
    tracing::debug!(width = w, height = h, "background decoded");

    Ok(BackgroundImage {
        width: w,
        height: h,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * a + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
