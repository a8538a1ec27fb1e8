use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CalwallError::invalid_config("x")
            .to_string()
            .contains("invalid config:")
    );
    assert!(
        CalwallError::decode("x")
            .to_string()
            .contains("image decode failure:")
    );
    assert!(CalwallError::render("x").to_string().contains("render error:"));
    assert!(
        CalwallError::dimensions(9000, 10, "width > 8192")
            .to_string()
            .contains("9000x10")
    );
}

#[test]
fn too_large_reports_both_sizes() {
    let err = CalwallError::ImageTooLarge {
        bytes: 6_000_000,
        max: 5_242_880,
    };
    let msg = err.to_string();
    assert!(msg.contains("6000000"));
    assert!(msg.contains("5242880"));
}

#[test]
fn font_timeout_lists_missing_families() {
    let err = CalwallError::FontLoadTimeout {
        families: vec!["Inter".to_string()],
        waited_ms: 250,
    };
    let msg = err.to_string();
    assert!(msg.contains("Inter"));
    assert!(msg.contains("250 ms"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CalwallError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
