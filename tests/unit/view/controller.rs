#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn controller(w: f64, h: f64, rows: usize, cols: usize) -> ViewportController {
    let mut c = ViewportController::new(&ViewConfig::default());
    c.set_container(Size::new(w, h));
    c.set_grid_dims(rows, cols);
    c
}

// --- center ---

#[test]
fn center_places_grid_in_middle_at_scale_one() {
    let mut c = controller(800.0, 600.0, 10, 20);
    assert!(c.zoom(-1.0, None));
    assert!(c.center(10.0));
    let t = c.transform();
    assert_eq!(t.scale, 1.0);
    assert_eq!(t.translate_x, 300.0);
    assert_eq!(t.translate_y, 250.0);
}

#[test]
fn center_is_idempotent() {
    let mut c = controller(640.0, 480.0, 33, 17);
    c.center(7.5);
    let first = c.transform();
    c.center(7.5);
    assert_eq!(c.transform(), first);
}

#[test]
fn center_waits_for_measurement() {
    let mut c = controller(0.0, 0.0, 10, 10);
    assert!(!c.center(10.0));
    assert_eq!(c.transform(), ViewTransform::default());

    let mut c = controller(100.0, 100.0, 10, 10);
    assert!(!c.center(0.0));
}

#[test]
fn center_abandons_active_drag() {
    let mut c = controller(100.0, 100.0, 2, 2);
    c.begin_drag(Point::new(0.0, 0.0));
    c.update_drag(Point::new(30.0, 30.0));
    c.center(10.0);
    assert!(!c.is_dragging());
    assert_eq!(c.drag_offset(), Vec2::ZERO);
    assert!(!c.is_subscribed(ListenerKind::PointerMove));
}

// --- zoom ---

#[test]
fn zoom_direction_follows_delta_sign() {
    let mut c = controller(100.0, 100.0, 2, 2);
    assert!(c.zoom(-120.0, None));
    assert!((c.transform().scale - 1.1).abs() < EPSILON);
    assert!(c.zoom(3.0, None));
    assert_eq!(c.transform().scale, 1.0);
    assert!(!c.zoom(0.0, None));
}

#[test]
fn zoom_scale_stays_within_bounds() {
    let mut c = controller(100.0, 100.0, 2, 2);
    for _ in 0..200 {
        c.zoom(-1.0, Some(Point::new(13.0, 77.0)));
        let s = c.transform().scale;
        assert!((1.0..=20.0).contains(&s));
    }
    assert_eq!(c.transform().scale, 20.0);
    assert!(!c.zoom(-1.0, None));

    for _ in 0..200 {
        c.zoom(1e9, Some(Point::new(-5.0, 5.0)));
        let s = c.transform().scale;
        assert!((1.0..=20.0).contains(&s));
    }
    assert_eq!(c.transform().scale, 1.0);
    assert!(!c.zoom(1.0, None));
}

#[test]
fn pivot_zoom_keeps_point_under_cursor_fixed() {
    let mut c = controller(400.0, 400.0, 10, 10);
    c.center(20.0);
    let pivot = Point::new(137.0, 251.0);
    let before = c.transform().screen_to_content(pivot);
    c.zoom(-1.0, Some(pivot));
    c.zoom(-1.0, Some(pivot));
    let after = c.transform().screen_to_content(pivot);
    assert!((before.x - after.x).abs() < EPSILON);
    assert!((before.y - after.y).abs() < EPSILON);
}

#[test]
fn zoom_without_pivot_only_changes_scale() {
    let mut c = controller(400.0, 400.0, 10, 10);
    c.center(20.0);
    let before = c.transform();
    c.zoom(-1.0, None);
    let after = c.transform();
    assert_eq!(after.translate_x, before.translate_x);
    assert_eq!(after.translate_y, before.translate_y);
    assert!(after.scale > before.scale);
}

#[test]
fn zoom_followed_by_inverse_restores_transform() {
    let mut c = controller(400.0, 400.0, 10, 10);
    c.center(20.0);
    c.zoom_by(3.0, None);
    let original = c.transform();
    let pivot = Some(Point::new(42.0, -17.0));

    c.zoom_by(1.1, pivot);
    c.zoom_by(1.0 / 1.1, pivot);
    assert!(c.transform().approx_eq(original, EPSILON));

    c.zoom_by(0.9, pivot);
    c.zoom_by(1.0 / 0.9, pivot);
    assert!(c.transform().approx_eq(original, EPSILON));
}

#[test]
fn zoom_rejects_degenerate_factors() {
    let mut c = controller(400.0, 400.0, 10, 10);
    assert!(!c.zoom_by(f64::NAN, None));
    assert!(!c.zoom_by(0.0, None));
    assert!(!c.zoom_by(-2.0, None));
}

// --- drag ---

#[test]
fn drag_moves_offset_but_not_transform_until_release() {
    let mut c = controller(400.0, 400.0, 10, 10);
    c.center(20.0);
    let before = c.transform();

    c.begin_drag(Point::new(100.0, 100.0));
    assert!(c.is_subscribed(ListenerKind::PointerMove));
    assert!(c.is_subscribed(ListenerKind::PointerUp));

    assert_eq!(c.update_drag(Point::new(130.0, 90.0)), Some(Vec2::new(30.0, -10.0)));
    assert_eq!(c.transform(), before);
    assert_eq!(c.visual_transform(), before.translated(Vec2::new(30.0, -10.0)));

    c.update_drag(Point::new(150.0, 80.0));
    assert_eq!(c.transform(), before);

    assert!(c.end_drag(Point::new(160.0, 70.0)));
    assert_eq!(c.transform(), before.translated(Vec2::new(60.0, -30.0)));
    assert_eq!(c.drag_offset(), Vec2::ZERO);
    assert!(!c.is_subscribed(ListenerKind::PointerMove));
    assert!(!c.is_subscribed(ListenerKind::PointerUp));
    assert!(c.is_subscribed(ListenerKind::Wheel));
}

#[test]
fn wheel_during_drag_leaves_transform_alone() {
    let mut c = controller(400.0, 400.0, 10, 10);
    c.center(20.0);
    let before = c.transform();

    c.begin_drag(Point::new(100.0, 100.0));
    c.update_drag(Point::new(110.0, 100.0));
    assert!(!c.zoom(-1.0, Some(Point::new(200.0, 200.0))));
    assert!(!c.zoom_by(2.0, None));
    assert_eq!(c.transform(), before);
    assert_eq!(c.drag_offset(), Vec2::new(10.0, 0.0));

    assert!(c.end_drag(Point::new(120.0, 100.0)));
    assert_eq!(c.transform(), before.translated(Vec2::new(20.0, 0.0)));
    assert!(c.zoom(-1.0, None));
    assert!(c.transform().scale > 1.0);
}

#[test]
fn drag_events_without_begin_are_ignored() {
    let mut c = controller(400.0, 400.0, 10, 10);
    assert_eq!(c.update_drag(Point::new(1.0, 1.0)), None);
    assert!(!c.end_drag(Point::new(1.0, 1.0)));
    assert_eq!(c.transform(), ViewTransform::default());
}

#[test]
fn cancel_drag_discards_offset() {
    let mut c = controller(400.0, 400.0, 10, 10);
    c.begin_drag(Point::new(0.0, 0.0));
    c.update_drag(Point::new(50.0, 50.0));
    c.cancel_drag();
    assert_eq!(c.transform(), ViewTransform::default());
    assert!(!c.is_dragging());
}

// --- lifetime ---

#[test]
fn dispose_unsubscribes_everything_and_ignores_input() {
    let mut c = controller(400.0, 400.0, 10, 10);
    c.begin_drag(Point::new(0.0, 0.0));
    let removed = c.dispose();
    assert_eq!(
        removed,
        vec![
            ListenerKind::Wheel,
            ListenerKind::Resize,
            ListenerKind::PointerMove,
            ListenerKind::PointerUp
        ]
    );
    assert_eq!(c.subscriptions().count(), 0);
    assert!(!c.zoom(-1.0, None));
    assert!(!c.center(10.0));
    c.begin_drag(Point::new(0.0, 0.0));
    assert!(!c.is_dragging());
}
