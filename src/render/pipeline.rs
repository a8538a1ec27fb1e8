use rayon::prelude::*;

use crate::analysis::luminance::ContrastReading;
use crate::assets::decode::BackgroundImage;
use crate::config::model::WallpaperConfig;
use crate::config::opts::{ExportPreset, RenderOpts};
use crate::encode::png::encode_png;
use crate::foundation::core::{Rgb8, SurfaceSize};
use crate::foundation::error::{CalwallError, CalwallResult};
use crate::render::background::BackgroundLayer;
use crate::render::compose::{Scene, TextColorChoice, compose};
use crate::render::cpu::CpuSurface;
use crate::render::surface::Frame;
use crate::text::fonts::FontRegistry;

/// Output of [`render_wallpaper`].
#[derive(Clone, Debug)]
pub struct RenderedWallpaper {
    /// Premultiplied RGBA8 pixels.
    pub frame: Frame,
    pub text_color: Rgb8,
    /// Present when the text color was derived from the background.
    pub contrast: Option<ContrastReading>,
}

/// One encoded preset from [`export_presets`].
#[derive(Clone, Debug)]
pub struct ExportedWallpaper {
    pub preset: ExportPreset,
    pub png: Vec<u8>,
}

/// Wait (bounded) for every family `config` draws with.
///
/// A timeout is logged and rendering continues with whatever faces resolve; other errors
/// propagate.
pub fn wait_for_fonts(
    config: &WallpaperConfig,
    fonts: &FontRegistry,
    opts: &RenderOpts,
) -> CalwallResult<()> {
    let families = config.required_families()?;
    match fonts.wait_ready(&families, opts.font_wait) {
        Ok(()) => Ok(()),
        Err(CalwallError::FontLoadTimeout {
            families,
            waited_ms,
        }) => {
            tracing::warn!(?families, waited_ms, "fonts not ready, rendering with fallback");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Render `config` over `background` at `size` into pixels.
///
/// Pipeline:
/// 1. validate `config` and `opts`
/// 2. [`wait_for_fonts`]
/// 3. [`compose`] onto a fresh [`CpuSurface`]
///
/// Identical inputs produce identical pixels.
#[tracing::instrument(skip(config, background, fonts, opts), fields(size = %size))]
pub fn render_wallpaper(
    config: &WallpaperConfig,
    background: Option<&BackgroundImage>,
    size: SurfaceSize,
    fonts: &FontRegistry,
    opts: &RenderOpts,
) -> CalwallResult<RenderedWallpaper> {
    config.validate()?;
    opts.validate()?;
    wait_for_fonts(config, fonts, opts)?;
    render_ready(config, background, size, fonts, opts)
}

fn render_ready(
    config: &WallpaperConfig,
    background: Option<&BackgroundImage>,
    size: SurfaceSize,
    fonts: &FontRegistry,
    opts: &RenderOpts,
) -> CalwallResult<RenderedWallpaper> {
    let mut surface = CpuSurface::new(size, fonts.clone())?;
    let scene = Scene {
        config,
        background: BackgroundLayer::new(background, opts.fill_rgb),
        text_color: TextColorChoice::for_config(config, opts.luminance_threshold)?,
    };
    let composed = compose(&mut surface, &scene)?;
    let frame = surface.finish()?;
    tracing::debug!(
        text_color = %composed.text_color.to_hex(),
        auto = composed.contrast.is_some(),
        "rendered wallpaper"
    );
    Ok(RenderedWallpaper {
        frame,
        text_color: composed.text_color,
        contrast: composed.contrast,
    })
}

/// [`render_wallpaper`] followed by PNG encoding.
pub fn render_png(
    config: &WallpaperConfig,
    background: Option<&BackgroundImage>,
    size: SurfaceSize,
    fonts: &FontRegistry,
    opts: &RenderOpts,
) -> CalwallResult<Vec<u8>> {
    let rendered = render_wallpaper(config, background, size, fonts, opts)?;
    encode_png(&rendered.frame)
}

/// Render every preset in parallel, each with the config's view mode replaced by the
/// preset's.
///
/// Results keep the order of `presets`. The first failure is returned.
#[tracing::instrument(skip(config, background, fonts, opts), fields(presets = presets.len()))]
pub fn export_presets(
    config: &WallpaperConfig,
    background: Option<&BackgroundImage>,
    presets: &[ExportPreset],
    fonts: &FontRegistry,
    opts: &RenderOpts,
    threads: Option<usize>,
) -> CalwallResult<Vec<ExportedWallpaper>> {
    config.validate()?;
    opts.validate()?;
    wait_for_fonts(config, fonts, opts)?;
    let pool = build_thread_pool(threads)?;

    let rendered = pool.install(|| {
        presets
            .par_iter()
            .map(|&preset| -> CalwallResult<ExportedWallpaper> {
                let mut cfg = config.clone();
                cfg.view_mode = preset.view_mode();
                let out = render_ready(&cfg, background, preset.size(), fonts, opts)?;
                Ok(ExportedWallpaper {
                    preset,
                    png: encode_png(&out.frame)?,
                })
            })
            .collect::<Vec<_>>()
    });

    let mut out = Vec::with_capacity(rendered.len());
    for item in rendered {
        out.push(item?);
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> CalwallResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CalwallError::invalid_config(
            "export 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CalwallError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
