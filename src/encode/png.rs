//! PNG output for rendered frames.

use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{CalwallError, CalwallResult};
use crate::render::surface::Frame;

/// Encode `frame` as an RGBA PNG (straight alpha).
pub fn encode_png(frame: &Frame) -> CalwallResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(
        frame.size.width,
        frame.size.height,
        frame.to_straight_rgba8(),
    )
    .ok_or_else(|| CalwallError::render("frame buffer does not match its dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| CalwallError::render(format!("png encode: {e}")))?;
    Ok(buf)
}

/// Write already-encoded PNG bytes to `path`, creating parent directories.
pub fn write_png_file(path: &Path, png: &[u8]) -> CalwallResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
