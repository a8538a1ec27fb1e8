use super::*;

#[test]
fn first_registered_family_is_fallback() {
    let reg = FontRegistry::new();
    reg.register("Alpha", vec![1, 2, 3]).unwrap();
    reg.register("Beta", vec![4]).unwrap();
    assert_eq!(reg.fallback().unwrap().as_deref(), Some("Alpha"));
    reg.set_fallback("Beta").unwrap();
    assert_eq!(reg.fallback().unwrap().as_deref(), Some("Beta"));
    assert!(reg.set_fallback("Gamma").is_err());
    assert_eq!(reg.families().unwrap(), vec!["Alpha", "Beta"]);
}

#[test]
fn resolve_substitutes_fallback() {
    let reg = FontRegistry::new();
    assert!(reg.resolve("Anything").is_err());
    reg.register("Alpha", vec![9]).unwrap();
    let (name, bytes) = reg.resolve("Missing").unwrap();
    assert_eq!(name, "Alpha");
    assert_eq!(bytes.as_slice(), &[9]);
    assert_eq!(reg.resolve("Alpha").unwrap().0, "Alpha");
}

#[test]
fn empty_family_or_data_is_rejected() {
    let reg = FontRegistry::new();
    assert!(reg.register("  ", vec![1]).is_err());
    assert!(reg.register("Alpha", Vec::new()).is_err());
    assert!(!reg.is_ready("Alpha"));
}

#[test]
fn wait_ready_times_out_with_missing_families() {
    let reg = FontRegistry::new();
    reg.register("Alpha", vec![1]).unwrap();
    let err = reg
        .wait_ready(
            &["Alpha".to_string(), "Beta".to_string()],
            Duration::from_millis(20),
        )
        .unwrap_err();
    match err {
        CalwallError::FontLoadTimeout { families, waited_ms } => {
            assert_eq!(families, vec!["Beta".to_string()]);
            assert!(waited_ms >= 15);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wait_ready_wakes_when_another_thread_registers() {
    let reg = FontRegistry::new();
    let loader = reg.clone();
    let handle = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        loader.register("Late", vec![1, 2]).unwrap();
    });
    reg.wait_ready(&["Late".to_string()], Duration::from_secs(5))
        .unwrap();
    assert!(reg.is_ready("Late"));
    handle.join().unwrap();
}

#[test]
fn register_file_reads_bytes() {
    let reg = FontRegistry::new();
    let path =
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans.ttf");
    reg.register_file("DejaVu Sans", &path).unwrap();
    assert!(reg.is_ready("DejaVu Sans"));
    assert!(reg.register_file("Nope", std::path::Path::new("/nonexistent/font.ttf")).is_err());
}
