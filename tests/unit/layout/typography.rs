use super::*;
use crate::text::measure::{FontWeight, MonospaceMeasure};

/// Narrow `i`, wide `m`, everything else average.
struct VariableMeasure;

impl TextMeasure for VariableMeasure {
    fn measure(&mut self, text: &str, font: &FontSpec) -> CalwallResult<f64> {
        Ok(text
            .chars()
            .map(|c| match c {
                'i' => 0.25,
                'm' => 0.9,
                _ => 0.5,
            })
            .sum::<f64>()
            * font.size_px)
    }
}

/// Records every size it was asked to measure at.
struct SizeLog {
    sizes: Vec<f64>,
}

impl TextMeasure for SizeLog {
    fn measure(&mut self, text: &str, font: &FontSpec) -> CalwallResult<f64> {
        if self.sizes.last() != Some(&font.size_px) {
            self.sizes.push(font.size_px);
        }
        Ok(text.chars().count() as f64 * 0.6 * font.size_px)
    }
}

fn font(size: f64) -> FontSpec {
    FontSpec::new("test", size, FontWeight::SEMI_BOLD)
}

#[test]
fn text_that_fits_keeps_nominal_size() {
    let mut m = MonospaceMeasure { advance_em: 0.5 };
    let fit = fit_to_width(&mut m, "jan", &font(40.0), 1000.0, 20.0).unwrap();
    assert_eq!(fit.size_px, 40.0);
    assert!((fit.tracking_px - 0.055 * 40.0).abs() < 1e-12);
    assert!((fit.width_px - (3.0 * 20.0 + 2.0 * fit.tracking_px)).abs() < 1e-9);
}

#[test]
fn shrink_steps_down_strictly_until_fit() {
    let mut log = SizeLog { sizes: Vec::new() };
    let fit = fit_to_width(&mut log, "september", &font(60.0), 300.0, 10.0).unwrap();
    for pair in log.sizes.windows(2) {
        assert!(pair[1] < pair[0], "sizes must strictly decrease: {:?}", log.sizes);
        assert!((pair[0] - pair[1] - 2.0).abs() < 1e-12);
    }
    assert!(fit.width_px <= 0.96 * 300.0);
    assert!(fit.size_px > 10.0);
    // One step larger would not have fit.
    let mut m = MonospaceMeasure::default();
    let bigger = fit.size_px + 2.0;
    let w = tracked_width(&mut m, "september", &font(bigger), tracking_for(bigger)).unwrap();
    assert!(w > 0.96 * 300.0);
}

#[test]
fn shrink_never_goes_below_floor() {
    let mut m = MonospaceMeasure::default();
    let fit = fit_to_width(&mut m, "a very long month title", &font(41.0), 50.0, 30.0).unwrap();
    assert_eq!(fit.size_px, 30.0);
    assert!(fit.width_px > 0.96 * 50.0);

    let fit = fit_to_width(&mut m, "x", &font(12.0), 1000.0, 20.0).unwrap();
    assert_eq!(fit.size_px, 20.0);
}

#[test]
fn tracked_layout_is_centered_and_uses_own_advances() {
    let mut m = VariableMeasure;
    let f = font(10.0);
    let line = layout_tracked(&mut m, "mim", &f, 1.0, 100.0).unwrap();
    assert_eq!(line.chars.len(), 3);
    let expected_width = 9.0 + 2.5 + 9.0 + 2.0;
    assert!((line.width - expected_width).abs() < 1e-12);
    assert!((line.chars[0].x - (100.0 - expected_width / 2.0)).abs() < 1e-12);
    assert!((line.chars[1].x - (line.chars[0].x + 9.0 + 1.0)).abs() < 1e-12);
    assert!((line.chars[2].x - (line.chars[1].x + 2.5 + 1.0)).abs() < 1e-12);
    let last = line.chars.last().unwrap();
    assert!((last.x + last.advance - (100.0 + expected_width / 2.0)).abs() < 1e-12);
}

#[test]
fn empty_text_has_zero_width() {
    let mut m = MonospaceMeasure::default();
    let line = layout_tracked(&mut m, "", &font(10.0), 2.0, 50.0).unwrap();
    assert!(line.chars.is_empty());
    assert_eq!(line.width, 0.0);
}
