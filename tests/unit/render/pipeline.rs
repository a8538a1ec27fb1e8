use std::time::Duration;

use super::*;
use crate::analysis::luminance::TextTone;

fn fonts() -> FontRegistry {
    let reg = FontRegistry::new();
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fonts/DejaVuSans.ttf");
    reg.register_file("DejaVu Sans", &path).unwrap();
    reg
}

fn opts() -> RenderOpts {
    RenderOpts {
        font_wait: Duration::from_millis(20),
        ..RenderOpts::default()
    }
}

fn config() -> WallpaperConfig {
    WallpaperConfig::new(2025, 0, "DejaVu Sans")
}

fn solid(rgb: [u8; 3]) -> BackgroundImage {
    let px: Vec<u8> = std::iter::repeat_n([rgb[0], rgb[1], rgb[2], 255], 16)
        .flatten()
        .collect();
    BackgroundImage::from_rgba8(4, 4, px).unwrap()
}

#[test]
fn no_background_leaves_flat_fill_in_corners() {
    let size = SurfaceSize::new(320, 180).unwrap();
    let mut o = opts();
    o.fill_rgb = Rgb8::new(20, 30, 40);
    let out = render_wallpaper(&config(), None, size, &fonts(), &o).unwrap();
    assert_eq!(out.frame.size, size);
    assert_eq!(&out.frame.data[..4], &[20, 30, 40, 255]);
    assert_eq!(out.text_color, Rgb8::WHITE);
    assert!(out.contrast.is_none());
}

#[test]
fn same_inputs_give_identical_png_bytes() {
    let size = SurfaceSize::new(240, 160).unwrap();
    let bg = solid([90, 120, 200]);
    let a = render_png(&config(), Some(&bg), size, &fonts(), &opts()).unwrap();
    let b = render_png(&config(), Some(&bg), size, &fonts(), &opts()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn auto_color_picks_tone_from_background() {
    let size = SurfaceSize::new(320, 180).unwrap();
    let mut cfg = config();
    cfg.auto_text_color = true;

    let bright = render_wallpaper(&cfg, Some(&solid([255, 255, 255])), size, &fonts(), &opts())
        .unwrap();
    assert_eq!(bright.contrast.map(|c| c.tone), Some(TextTone::Dark));
    assert_eq!(bright.text_color, Rgb8::BLACK);

    let dark = render_wallpaper(&cfg, Some(&solid([0, 0, 0])), size, &fonts(), &opts()).unwrap();
    assert_eq!(dark.contrast.map(|c| c.tone), Some(TextTone::Light));
    assert_eq!(dark.text_color, Rgb8::WHITE);
}

#[test]
fn missing_family_times_out_and_falls_back() {
    let size = SurfaceSize::new(200, 120).unwrap();
    let cfg = WallpaperConfig::new(2025, 5, "Nowhere||Nobody");
    let out = render_wallpaper(&cfg, None, size, &fonts(), &opts()).unwrap();
    assert_eq!(out.frame.size, size);
}

#[test]
fn invalid_inputs_are_rejected() {
    let size = SurfaceSize::new(64, 64).unwrap();
    let mut cfg = config();
    cfg.month = 12;
    assert!(matches!(
        render_wallpaper(&cfg, None, size, &fonts(), &opts()),
        Err(CalwallError::InvalidConfig(_))
    ));

    let mut o = opts();
    o.luminance_threshold = 2.0;
    assert!(render_wallpaper(&config(), None, size, &fonts(), &o).is_err());
}

#[test]
fn export_keeps_preset_order_and_sizes() {
    let presets = [ExportPreset::MobileHd, ExportPreset::DesktopHd];
    let out = export_presets(&config(), None, &presets, &fonts(), &opts(), Some(2)).unwrap();
    assert_eq!(out.len(), 2);
    for (exported, preset) in out.iter().zip(presets) {
        assert_eq!(exported.preset, preset);
        let img = image::load_from_memory(&exported.png).unwrap();
        let size = preset.size();
        assert_eq!((img.width(), img.height()), (size.width, size.height));
    }
}

#[test]
fn zero_threads_is_rejected() {
    let err = export_presets(
        &config(),
        None,
        &[ExportPreset::DesktopHd],
        &fonts(),
        &opts(),
        Some(0),
    )
    .unwrap_err();
    assert!(matches!(err, CalwallError::InvalidConfig(_)));
}
