use glam::Vec2;
use heart_core::*;

fn hand(center: Vec2, size: f32) -> HandReading {
    HandReading {
        center,
        size,
        is_fist: false,
        is_pinching: false,
        gesture: Gesture::Open,
    }
}

fn right(reading: HandReading) -> HandPair {
    HandPair {
        left: None,
        right: Some(reading),
    }
}

#[test]
fn explosion_map_endpoints_and_clamping() {
    assert!((map_explosion(0.08) - 1.0).abs() < 1e-6);
    assert!((map_explosion(0.22) - 0.0).abs() < 1e-6);
    assert!((map_explosion(0.15) - 0.5).abs() < 1e-5);
    assert_eq!(map_explosion(0.01), map_explosion(0.08));
    assert_eq!(map_explosion(0.9), map_explosion(0.22));
}

#[test]
fn explosion_map_is_monotonic_decreasing() {
    let mut prev = map_explosion(0.0);
    for i in 1..=100 {
        let e = map_explosion(i as f32 * 0.003);
        assert!(e <= prev, "explosion grew at size {}", i as f32 * 0.003);
        assert!((0.0..=1.0).contains(&e));
        prev = e;
    }
}

#[test]
fn collapse_is_faster_than_expansion() {
    let down = approach(0.5, 0.0, explode_alpha(0.5, 0.0));
    let up = approach(0.5, 1.0, explode_alpha(0.5, 1.0));
    assert!((down - 0.46).abs() < 1e-6);
    assert!((up - 0.51).abs() < 1e-6);
}

#[test]
fn object_scale_tracks_explosion() {
    assert!((object_scale_for(0.0) - 1.0).abs() < 1e-6);
    assert!((object_scale_for(1.0) - 1.5).abs() < 1e-6);
    assert!((object_scale_for(2.0) - 1.5).abs() < 1e-6);
}

#[test]
fn rest_targets_without_hand() {
    let t = MotionTargets::for_hand(None);
    assert_eq!(t, MotionTargets::REST);
    assert_eq!(t.explode, 0.0);
    assert_eq!(t.offset, Vec2::ZERO);
    assert!((t.rotation_speed - 0.002).abs() < 1e-9);
}

#[test]
fn hand_targets_are_mirrored_and_scaled() {
    let t = MotionTargets::for_hand(Some(&hand(Vec2::new(0.25, 0.7), 0.22)));
    assert!((t.offset.x - 3.75).abs() < 1e-5);
    assert!((t.offset.y - -2.0).abs() < 1e-5);
    assert!((t.rotation_speed - -0.02).abs() < 1e-6);
    assert!(t.explode.abs() < 1e-6);

    let centered = MotionTargets::for_hand(Some(&hand(Vec2::splat(0.5), 0.15)));
    assert_eq!(centered.offset, Vec2::ZERO);
    assert_eq!(centered.rotation_speed, 0.0);
}

#[test]
fn driver_relaxes_to_rest_after_hand_leaves() {
    let mut d = AnimationDriver::new([1.0, 0.0, 0.33], [0.0, 1.0, 1.0]);
    let far = right(hand(Vec2::new(0.2, 0.2), 0.05));
    for _ in 0..600 {
        d.step(&far);
    }
    assert!(d.explode() > 0.99);
    assert!(d.scale() > 1.45);
    assert!(d.offset().x > 4.0);

    let mut targets = None;
    for _ in 0..300 {
        targets = Some(d.step(&HandPair::default()).1);
    }
    assert!(d.explode() < 1e-3);
    assert!((d.scale() - 1.0).abs() < 1e-2);
    assert!(d.offset().length() < 1e-3);
    assert_eq!(targets.unwrap().rotation_speed, BASELINE_ROTATION_SPEED);
}

#[test]
fn rotation_integrates_target_speed_per_frame() {
    let mut d = AnimationDriver::new([1.0; 3], [1.0; 3]);
    for _ in 0..100 {
        d.step(&HandPair::default());
    }
    assert!((d.rotation_y() - 0.2).abs() < 1e-4);

    let before = d.rotation_y();
    d.step(&right(hand(Vec2::new(0.0, 0.5), 0.15)));
    assert!((d.rotation_y() - (before - 0.04)).abs() < 1e-5);
}

#[test]
fn explosion_moves_monotonically_toward_target() {
    let mut d = AnimationDriver::new([1.0; 3], [1.0; 3]);
    let far = right(hand(Vec2::splat(0.5), 0.08));
    let mut prev = d.explode();
    for _ in 0..200 {
        d.step(&far);
        assert!(d.explode() >= prev && d.explode() <= 1.0);
        prev = d.explode();
    }
    let near = right(hand(Vec2::splat(0.5), 0.22));
    for _ in 0..200 {
        d.step(&near);
        assert!(d.explode() <= prev && d.explode() >= 0.0);
        prev = d.explode();
    }
}

#[test]
fn frame_packages_uniforms() {
    let mut d = AnimationDriver::new([0.1, 0.2, 0.3], [0.4, 0.5, 0.6]);
    let f = d.frame(&HandPair::default(), 12.5, 2.0);
    assert_eq!(f.uniforms.time, 12.5);
    assert_eq!(f.uniforms.pixel_ratio, 2.0);
    assert_eq!(f.uniforms.color_a, [0.1, 0.2, 0.3]);
    assert_eq!(f.uniforms.color_b, [0.4, 0.5, 0.6]);
    assert_eq!(f.uniforms.explode, d.explode());
    assert_eq!(f.targets, MotionTargets::REST);
}

#[test]
fn model_matrix_places_field() {
    let t = FieldTransform {
        offset: Vec2::new(2.0, -1.0),
        scale: 1.5,
        rotation_y: 0.0,
    };
    let p = t.model_matrix().transform_point3(glam::Vec3::new(1.0, 1.0, 0.0));
    assert!((p - glam::Vec3::new(3.5, 0.5, 0.0)).length() < 1e-5);
}
