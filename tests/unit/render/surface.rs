use super::*;

fn stops(a: Rgba, b: Rgba) -> Vec<ColorStop> {
    vec![
        ColorStop {
            offset: 0.0,
            color: a,
        },
        ColorStop {
            offset: 1.0,
            color: b,
        },
    ]
}

#[test]
fn linear_gradient_pads_and_interpolates() {
    let paint = Paint::Linear {
        start: Point::new(0.0, 70.0),
        end: Point::new(0.0, 100.0),
        stops: stops(Rgba::TRANSPARENT, Rgba::black(0.18)),
    };
    assert_eq!(paint.color_at(Point::new(5.0, 10.0)).a, 0.0);
    assert!((paint.color_at(Point::new(5.0, 100.0)).a - 0.18).abs() < 1e-6);
    assert!((paint.color_at(Point::new(5.0, 200.0)).a - 0.18).abs() < 1e-6);
    assert!((paint.color_at(Point::new(5.0, 85.0)).a - 0.09).abs() < 1e-6);
}

#[test]
fn radial_gradient_pads_inside_and_outside() {
    let paint = Paint::Radial {
        center: Point::new(50.0, 50.0),
        r0: 10.0,
        r1: 30.0,
        stops: stops(Rgba::black(0.1), Rgba::black(0.4)),
    };
    assert!((paint.color_at(Point::new(50.0, 50.0)).a - 0.1).abs() < 1e-6);
    assert!((paint.color_at(Point::new(50.0, 70.0)).a - 0.25).abs() < 1e-6);
    assert!((paint.color_at(Point::new(0.0, 0.0)).a - 0.4).abs() < 1e-6);
}

#[test]
fn empty_stops_are_transparent() {
    let paint = Paint::Linear {
        start: Point::ZERO,
        end: Point::new(1.0, 0.0),
        stops: Vec::new(),
    };
    assert_eq!(paint.color_at(Point::ZERO), Rgba::TRANSPARENT);
}

#[test]
fn frame_unpremultiplies() {
    let size = SurfaceSize::new(2, 1).unwrap();
    let frame = Frame::new(size, vec![64, 32, 0, 128, 10, 20, 30, 255]).unwrap();
    let straight = frame.to_straight_rgba8();
    assert_eq!(&straight[..4], &[128, 64, 0, 128]);
    assert_eq!(&straight[4..], &[10, 20, 30, 255]);
    assert!(Frame::new(size, vec![0; 4]).is_err());
}
