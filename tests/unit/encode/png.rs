use super::*;
use crate::foundation::core::SurfaceSize;

#[test]
fn png_round_trips_straight_alpha() {
    let size = SurfaceSize::new(2, 1).unwrap();
    // Second pixel: straight (200, 100, 0) at half alpha, premultiplied.
    let frame = Frame::new(size, vec![10, 20, 30, 255, 100, 50, 0, 128]).unwrap();
    let png = encode_png(&frame).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30, 255]);
    let p = decoded.get_pixel(1, 0).0;
    assert_eq!(p[3], 128);
    assert!(p[0].abs_diff(199) <= 1);
    assert!(p[1].abs_diff(100) <= 1);
}

#[test]
fn write_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("calwall-png-{}", std::process::id()));
    let path = dir.join("nested/out.png");
    write_png_file(&path, b"x").unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"x");
    let _ = std::fs::remove_dir_all(&dir);
}
