use super::*;

#[test]
fn weight_zero_is_light_gray() {
    let s = WallShading::default();
    assert_eq!(s.brightness(0), 230);
    assert_eq!(s.shade(0).color(), Rgba8Premul::opaque(230, 230, 230));
}

#[test]
fn weight_at_or_above_threshold_is_black() {
    let s = WallShading::default();
    assert_eq!(s.brightness(255), 0);
    assert_eq!(s.brightness(10_000), 0);
    assert!(s.shade(255).is_solid());
    assert_eq!(s.shade(300).color(), Rgba8Premul::opaque(0, 0, 0));
}

#[test]
fn brightness_is_monotonic_non_increasing() {
    for threshold in [255, 1000] {
        let s = WallShading::new(threshold);
        let mut prev = s.brightness(0);
        for w in 1..=1200 {
            let b = s.brightness(w);
            assert!(b <= prev, "threshold {threshold}: weight {w} got {b} > {prev}");
            prev = b;
        }
    }
}

#[test]
fn midpoint_weight_maps_halfway() {
    let s = WallShading::default();
    // 230 - 128 * 230/255 = 114.55
    assert_eq!(s.brightness(128), 115);
}

#[test]
fn higher_threshold_keeps_gradient_clamped() {
    let s = WallShading::new(1000);
    assert_eq!(s.brightness(254), 1);
    assert_eq!(s.brightness(400), 0);
    assert_eq!(s.brightness(999), 0);
}

#[test]
fn shades_order_by_brightness() {
    assert!(WallShade(0) < WallShade(12));
    assert!(WallShade::SOLID.is_solid());
}
