use super::*;
use crate::config::model::{HeaderFormat, WeekStart};
use crate::foundation::core::SurfaceSize;
use crate::layout::geometry::{LayoutInput, plan_layout};
use crate::render::recording::RecordingSurface;

fn setup(config: &WallpaperConfig, size: SurfaceSize) -> (RecordingSurface, Layout) {
    let layout = plan_layout(&LayoutInput {
        size,
        view_mode: config.view_mode,
        scale: config.calendar_scale,
        offset_x: config.offset_x,
        offset_y: config.offset_y,
    });
    (RecordingSurface::new(size), layout)
}

#[test]
fn january_2025_draws_title_labels_and_31_dates() {
    let config = WallpaperConfig::new(2025, 0, "Title||Body");
    let size = SurfaceSize::new(1920, 1080).unwrap();
    let (mut s, layout) = setup(&config, size);
    let fonts = config.fonts().unwrap();
    draw_calendar(&mut s, &config, &layout, &fonts, Rgb8::WHITE).unwrap();

    let texts: Vec<_> = s.texts().collect();
    // "january" per char, 7 labels, 31 dates.
    assert_eq!(texts.len(), 7 + 7 + 31);

    let title: String = texts[..7].iter().map(|(t, _, _)| *t).collect();
    assert_eq!(title, "january");
    for (_, origin, style) in &texts[..7] {
        assert_eq!(style.font.family, "Title");
        assert_eq!(style.font.weight, FontWeight::SEMI_BOLD);
        assert!((origin.y - layout.title_anchor.y).abs() < 1e-9);
    }

    let labels: Vec<&str> = texts[7..14].iter().map(|(t, _, _)| *t).collect();
    assert_eq!(labels, vec!["S", "M", "T", "W", "T", "F", "S"]);
    for (_, _, style) in &texts[7..14] {
        assert_eq!(style.opacity, WEEKDAY_OPACITY);
        assert_eq!(style.font.family, "Body");
    }

    let (first, origin, style) = texts[14];
    assert_eq!(first, "1");
    assert_eq!(style.opacity, 1.0);
    assert!((origin.x - layout.column_center_x(3)).abs() < 1e-9);
    assert!((origin.y - layout.row_baseline_y(0)).abs() < 1e-9);
    assert_eq!(texts.last().map(|t| t.0), Some("31"));
}

#[test]
fn monday_start_shifts_first_column() {
    let mut config = WallpaperConfig::new(2025, 0, "Any");
    config.week_start = WeekStart::Monday;
    let size = SurfaceSize::new(1280, 720).unwrap();
    let (mut s, layout) = setup(&config, size);
    draw_calendar(&mut s, &config, &layout, &config.fonts().unwrap(), Rgb8::BLACK).unwrap();
    let texts: Vec<_> = s.texts().collect();
    assert_eq!(texts[7].0, "M");
    let one = texts.iter().find(|(t, _, _)| *t == "1").unwrap();
    assert!((one.1.x - layout.column_center_x(2)).abs() < 1e-9);
}

#[test]
fn long_title_is_shrunk_and_tracked_within_grid() {
    let mut config = WallpaperConfig::new(2025, 8, "Any");
    config.header_format = HeaderFormat::Full;
    let size = SurfaceSize::new(1000, 1000).unwrap();
    let (mut s, layout) = setup(&config, size);
    draw_calendar(&mut s, &config, &layout, &config.fonts().unwrap(), Rgb8::WHITE).unwrap();

    let title: Vec<_> = s.texts().take(9).collect();
    let size_px = title[0].2.font.size_px;
    assert!(size_px < layout.title_size);
    assert!(size_px >= layout.title_min_size);
    // Monospace advance 0.6em plus tracking between chars.
    let step = title[1].1.x - title[0].1.x;
    assert!((step - (0.6 * size_px + 0.055 * size_px)).abs() < 1e-9);
    let left = title[0].1.x;
    let right = title[8].1.x + 0.6 * size_px;
    assert!(((left + right) / 2.0 - layout.title_anchor.x).abs() < 1e-9);
}

#[test]
fn every_draw_carries_the_calendar_shadow() {
    let config = WallpaperConfig::new(2024, 1, "Any");
    let size = SurfaceSize::new(1000, 1000).unwrap();
    let (mut s, layout) = setup(&config, size);
    draw_calendar(&mut s, &config, &layout, &config.fonts().unwrap(), Rgb8::WHITE).unwrap();
    let shadow = calendar_shadow(1000.0);
    assert!(s.texts().all(|(_, _, st)| st.shadow == Some(shadow)));
    assert_eq!(s.texts().filter(|(_, _, st)| st.opacity == 1.0).count(), 8 + 29);
}
