use super::*;

#[test]
fn over_opaque_replaces_and_transparent_keeps() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [1, 2, 3, 255], 1.0), [1, 2, 3, 255]);
    assert_eq!(over(dst, [0, 0, 0, 0], 1.0), dst);
    assert_eq!(over(dst, [1, 2, 3, 255], 0.0), dst);
}

#[test]
fn over_half_black_darkens_white() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 128], 1.0);
    assert_eq!(out[3], 255);
    assert_eq!(out[0], 127);
}

#[test]
fn pixel_rect_clips_to_surface() {
    let size = SurfaceSize::new(10, 8).unwrap();
    let r = PixelRect::from_rect(Rect::new(-5.0, 2.4, 20.0, 6.6), size);
    assert_eq!(r, PixelRect { x0: 0, y0: 2, x1: 10, y1: 7 });
    let c = PixelRect::covering(Rect::new(1.2, 1.2, 3.1, 3.9), size);
    assert_eq!(c, PixelRect { x0: 1, y0: 1, x1: 4, y1: 4 });
    assert!(PixelRect::from_rect(Rect::new(20.0, 0.0, 30.0, 5.0), size).is_empty());
}

#[test]
fn region_composite_leaves_outside_untouched() {
    let size = SurfaceSize::new(3, 1).unwrap();
    let mut dst = vec![0u8; 12];
    let src = [255u8, 0, 0, 255].repeat(3);
    let region = PixelRect { x0: 1, y0: 0, x1: 2, y1: 1 };
    over_region_in_place(&mut dst, &src, size, region, 1.0).unwrap();
    assert_eq!(dst, vec![0, 0, 0, 0, 255, 0, 0, 255, 0, 0, 0, 0]);
    assert!(over_region_in_place(&mut dst, &src[..8], size, region, 1.0).is_err());
}

#[test]
fn per_pixel_fill_uses_coordinates() {
    let size = SurfaceSize::new(2, 2).unwrap();
    let mut dst = vec![0u8; 16];
    over_with_in_place(&mut dst, size, PixelRect::from_rect(size.rect(), size), |x, y| {
        [(x * 100) as u8, (y * 100) as u8, 0, 255]
    })
    .unwrap();
    assert_eq!(&dst[12..16], &[100, 100, 0, 255]);
}
