use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn default_is_identity() {
    let t = ViewTransform::default();
    assert_eq!(t.to_affine(), Affine::IDENTITY);
    assert_eq!(t.content_to_screen(Point::new(5.0, 6.0)), Point::new(5.0, 6.0));
}

#[test]
fn affine_matches_manual_mapping() {
    let t = ViewTransform {
        scale: 2.5,
        translate_x: 40.0,
        translate_y: -12.0,
    };
    let p = Point::new(3.0, 7.0);
    let a = t.to_affine() * p;
    let m = t.content_to_screen(p);
    assert!(approx_eq(a.x, m.x) && approx_eq(a.y, m.y));
    assert!(approx_eq(m.x, 47.5));
    assert!(approx_eq(m.y, 5.5));
}

#[test]
fn screen_content_roundtrip() {
    let t = ViewTransform {
        scale: 3.0,
        translate_x: 120.0,
        translate_y: -48.0,
    };
    for (x, y) in [(-250.0, -100.0), (0.0, 0.0), (13.5, 92.25)] {
        let back = t.screen_to_content(t.content_to_screen(Point::new(x, y)));
        assert!(approx_eq(back.x, x));
        assert!(approx_eq(back.y, y));
    }
}

#[test]
fn screen_rect_maps_through_inverse() {
    let t = ViewTransform {
        scale: 2.0,
        translate_x: 10.0,
        translate_y: 20.0,
    };
    let r = t.screen_rect_to_content(Rect::new(10.0, 20.0, 110.0, 220.0));
    assert!(approx_eq(r.x0, 0.0));
    assert!(approx_eq(r.y0, 0.0));
    assert!(approx_eq(r.x1, 50.0));
    assert!(approx_eq(r.y1, 100.0));
}

#[test]
fn translated_keeps_scale() {
    let t = ViewTransform {
        scale: 4.0,
        translate_x: 1.0,
        translate_y: 2.0,
    };
    let moved = t.translated(Vec2::new(10.0, -5.0));
    assert_eq!(moved.scale, 4.0);
    assert_eq!(moved.translate_x, 11.0);
    assert_eq!(moved.translate_y, -3.0);
}
