use super::*;

#[test]
fn presets_cover_both_view_modes() {
    let desktop = ExportPreset::for_view(ViewMode::Desktop);
    let mobile = ExportPreset::for_view(ViewMode::Mobile);
    assert_eq!(desktop.len(), 3);
    assert_eq!(mobile.len(), 3);
    for p in desktop {
        let s = p.size();
        assert!(s.width > s.height, "{} should be landscape", p.name());
    }
    for p in mobile {
        let s = p.size();
        assert!(s.height > s.width, "{} should be portrait", p.name());
    }
    assert_eq!(
        ExportPreset::Desktop4k.size(),
        SurfaceSize {
            width: 3840,
            height: 2160
        }
    );
}

#[test]
fn preset_names_match_serde_names() {
    for p in ExportPreset::all() {
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, format!("\"{}\"", p.name()));
    }
}

#[test]
fn default_opts_validate() {
    let opts = RenderOpts::default();
    opts.validate().unwrap();
    assert_eq!(opts.luminance_threshold, 0.5);

    let bad = RenderOpts {
        luminance_threshold: 1.5,
        ..RenderOpts::default()
    };
    assert!(bad.validate().is_err());
}
