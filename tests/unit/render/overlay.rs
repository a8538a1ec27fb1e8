use super::*;
use crate::config::model::OverlayPosition;
use crate::foundation::core::SurfaceSize;
use crate::layout::geometry::{LayoutInput, plan_layout};
use crate::render::recording::RecordingSurface;

fn layout(w: u32, h: u32) -> Layout {
    plan_layout(&LayoutInput {
        size: SurfaceSize::new(w, h).unwrap(),
        view_mode: Default::default(),
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    })
}

fn overlay(content: &str, position: OverlayPosition) -> TextOverlay {
    TextOverlay {
        enabled: true,
        content: content.to_string(),
        font_size: 1.0,
        font: "Overlay".to_string(),
        use_typography_font: false,
        position,
    }
}

fn pair() -> FontPair {
    FontPair::parse("Title||Body").unwrap()
}

#[test]
fn anchors_follow_the_nine_zones() {
    let l = layout(1000, 1000);
    let safe = l.overlay_safe_area;
    for position in OverlayPosition::ALL {
        let mut s = RecordingSurface::new(l.size);
        let block = plan_overlay(&mut s, &overlay("hi", position), &l, &pair()).unwrap();
        let total = block.line_height;
        match position.v_anchor() {
            VAnchor::Top => assert!((block.top - safe.y0).abs() < 1e-9),
            VAnchor::Bottom => assert!((block.top + total - safe.y1).abs() < 1e-9),
            VAnchor::Middle => assert!((block.top + total / 2.0 - 500.0).abs() < 1e-9),
        }
        match position.h_anchor() {
            HAnchor::Left => assert_eq!((block.x, block.align), (safe.x0, TextAlign::Left)),
            HAnchor::Right => assert_eq!((block.x, block.align), (safe.x1, TextAlign::Right)),
            HAnchor::Center => assert_eq!((block.x, block.align), (500.0, TextAlign::Center)),
        }
    }
}

#[test]
fn bottom_block_grows_upward_from_safe_edge_but_draws_downward() {
    let l = layout(1920, 1080);
    let mut s = RecordingSurface::new(l.size);
    let o = overlay("one\n\nthree", OverlayPosition::BottomRight);
    draw_overlay(&mut s, &o, &l, &pair(), Rgb8::WHITE).unwrap();
    let texts: Vec<_> = s.texts().collect();
    assert_eq!(texts.len(), 2);
    let lh = 1.3 * 0.04 * 1080.0;
    assert!((texts[1].1.y - texts[0].1.y - 2.0 * lh).abs() < 1e-9);
    assert!((texts[0].1.y + 3.0 * lh - l.overlay_safe_area.y1).abs() < 1e-9);
    for (_, _, style) in &texts {
        assert_eq!(style.baseline, TextBaseline::Top);
        assert_eq!(style.align, TextAlign::Right);
        assert_eq!(style.font.family, "Overlay");
        assert_eq!(style.shadow, Some(overlay_shadow(1080.0)));
    }
}

#[test]
fn typography_font_uses_title_family_and_size_multiplier() {
    let l = layout(1000, 1000);
    let mut o = overlay("text", OverlayPosition::TopCenter);
    o.use_typography_font = true;
    o.font_size = 2.0;
    let mut s = RecordingSurface::new(l.size);
    let block = plan_overlay(&mut s, &o, &l, &pair()).unwrap();
    assert_eq!(block.font.family, "Title");
    assert!((block.font.size_px - 80.0).abs() < 1e-9);
}

#[test]
fn long_text_wraps_to_safe_width() {
    let l = layout(1000, 1000);
    let words = vec!["word"; 40].join(" ");
    let mut s = RecordingSurface::new(l.size);
    let block = plan_overlay(&mut s, &overlay(&words, OverlayPosition::MiddleCenter), &l, &pair())
        .unwrap();
    assert!(block.lines.len() > 1);
    let max = l.overlay_safe_area.width();
    for line in &block.lines {
        assert!(line.chars().count() as f64 * 0.6 * block.font.size_px <= max + 1e-9);
    }
}

#[test]
fn overlay_shadow_is_stronger_than_calendar_shadow() {
    let o = overlay_shadow(1000.0);
    let c = crate::render::calendar::calendar_shadow(1000.0);
    assert!(o.color.a > c.color.a);
    assert!(o.blur > c.blur);
}
