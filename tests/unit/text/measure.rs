use super::*;

#[test]
fn monospace_scales_with_size_and_length() {
    let mut m = MonospaceMeasure { advance_em: 0.5 };
    let font = FontSpec::new("any", 20.0, FontWeight::NORMAL);
    assert_eq!(m.measure("abcd", &font).unwrap(), 40.0);
    assert_eq!(m.measure("", &font).unwrap(), 0.0);
    assert_eq!(m.measure("ab", &font.with_size(10.0)).unwrap(), 10.0);
}

#[test]
fn invalid_sizes_are_rejected() {
    let mut m = MonospaceMeasure::default();
    for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let font = FontSpec::new("any", size, FontWeight::NORMAL);
        assert!(m.measure("a", &font).is_err());
    }
}
