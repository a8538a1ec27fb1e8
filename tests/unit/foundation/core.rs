use super::*;

#[test]
fn surface_size_parses_and_rejects() {
    assert_eq!(
        SurfaceSize::parse("1920x1080").unwrap(),
        SurfaceSize {
            width: 1920,
            height: 1080
        }
    );
    assert!(SurfaceSize::parse("1920").is_err());
    assert!(SurfaceSize::parse("0x10").is_err());
    assert!(SurfaceSize::parse("9000x10").is_err());
    assert_eq!(SurfaceSize::new(720, 1280).unwrap().to_string(), "720x1280");
}

#[test]
fn hex_color_is_strict() {
    assert_eq!(Rgb8::parse_hex("#FFffFF").unwrap(), Rgb8::WHITE);
    assert_eq!(Rgb8::parse_hex("#102030").unwrap(), Rgb8::new(16, 32, 48));
    for bad in ["FFFFFF", "#FFF", "#GGGGGG", "#1234567", ""] {
        assert!(Rgb8::parse_hex(bad).is_err(), "{bad} should be rejected");
    }
    assert_eq!(Rgb8::new(10, 171, 255).to_hex(), "#0AABFF");
}

#[test]
fn rgba_lerp_and_premul() {
    let a = Rgba::black(0.1);
    let b = Rgba::black(0.4);
    let mid = a.lerp(b, 0.5);
    assert!((mid.a - 0.25).abs() < 1e-6);
    assert_eq!(
        Rgba {
            r: 255,
            g: 255,
            b: 255,
            a: 0.5
        }
        .to_premul(),
        Rgba8Premul {
            r: 128,
            g: 128,
            b: 128,
            a: 128
        }
    );
}
