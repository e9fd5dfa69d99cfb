// Checks on the host-side mirror of the particle shader math.

use glam::Vec3;
use heart_core::shading::*;
use heart_core::PARTICLES_WGSL;

#[test]
fn heartbeat_only_while_collapsed() {
    let t = 0.25; // sin(1.5) is near its peak
    let beat = beat_scale(0.0, t);
    assert!((beat - (1.0 + 0.08 * (1.5f32).sin())).abs() < 1e-6);
    for e in [0.3, 0.5, 1.0] {
        assert!((beat_scale(e, t) - 1.0).abs() < 1e-6, "beat at explode {e}");
    }
    // partially faded between 0 and 0.3
    let mid = beat_scale(0.15, t) - 1.0;
    assert!(mid > 0.0 && mid < beat - 1.0);
}

#[test]
fn explode_curve_is_square_root() {
    assert_eq!(explode_curve(0.0), 0.0);
    assert!((explode_curve(0.25) - 0.5).abs() < 1e-6);
    assert!((explode_curve(1.0) - 1.0).abs() < 1e-6);
    assert_eq!(explode_curve(-0.1), 0.0);
}

#[test]
fn explosion_offset_has_full_distance() {
    let off = explosion_offset(Vec3::new(0.1, 0.2, 0.0), Vec3::new(1.0, -1.0, 0.5), 1.0);
    assert!((off.length() - 60.0).abs() < 1e-3);
    let half = explosion_offset(Vec3::new(0.1, 0.2, 0.0), Vec3::ZERO, 0.5);
    assert!((half.length() - 30.0).abs() < 1e-3);
}

#[test]
fn explosion_offset_of_degenerate_direction_is_zero() {
    assert_eq!(explosion_offset(Vec3::ZERO, Vec3::ZERO, 1.0), Vec3::ZERO);
}

#[test]
fn point_size_shrinks_with_explosion_and_depth() {
    assert!((point_size(1.0, 0.0, 1.0, -10.0) - 22.0).abs() < 1e-4);
    assert!((point_size(1.0, 1.0, 1.0, -10.0) - 6.0).abs() < 1e-4);
    assert!((point_size(1.0, 0.0, 2.0, -10.0) - 44.0).abs() < 1e-4);
    assert!(point_size(1.0, 0.0, 1.0, -20.0) < point_size(1.0, 0.0, 1.0, -10.0));
}

#[test]
fn glow_saturates_at_center_and_vanishes_at_edge() {
    assert_eq!(glow_strength(0.0), 1.0);
    assert!((glow_strength(0.5) - (0.1 / 0.55 - 0.1)).abs() < 1e-6);
    assert!(glow_strength(0.95) < 1e-6);
    let mut prev = glow_strength(0.0);
    for i in 1..=70 {
        let g = glow_strength(i as f32 * 0.01);
        assert!(g <= prev);
        prev = g;
    }
}

#[test]
fn flash_peaks_mid_explosion() {
    assert_eq!(flash_intensity(0.0), 0.0);
    assert_eq!(flash_intensity(1.0), 0.0);
    assert!((flash_intensity(0.5) - 2.0).abs() < 1e-6);
    assert!(flash_intensity(0.2) > 0.0 && flash_intensity(0.2) < 2.0);
}

#[test]
fn breathing_stays_in_band() {
    for i in 0..200 {
        let b = breathe(i as f32 * 0.05);
        assert!((0.6 - 1e-6..=1.0 + 1e-6).contains(&b));
    }
}

#[test]
fn faint_fragments_are_discarded() {
    assert!(fragment_alpha(0.0, 1.0, 0.0).is_some());
    assert!(fragment_alpha(0.9, 1.0, 0.0).is_none());
    // sprite corner with the shortest life at the breathing trough
    let trough = -std::f32::consts::FRAC_PI_2 / 3.0;
    assert!(fragment_alpha(0.7071, 0.4, trough).is_none());
    let a = fragment_alpha(0.1, 0.8, 0.0).unwrap();
    assert!((a - glow_strength(0.1) * 0.8 * 0.8).abs() < 1e-6);
}

#[test]
fn base_color_blends_with_distance() {
    let a = Vec3::new(1.0, 0.0, 0.333);
    let b = Vec3::new(0.0, 1.0, 1.0);
    assert_eq!(base_color(Vec3::ZERO, a, b), a);
    let far = base_color(Vec3::new(0.0, 0.0, 1.0 / 0.03), a, b);
    assert!((far - b).length() < 1e-4);
}

#[test]
fn shader_source_exposes_entry_points() {
    assert!(PARTICLES_WGSL.contains("fn vs_main"));
    assert!(PARTICLES_WGSL.contains("fn fs_main"));
    assert!(PARTICLES_WGSL.contains("fn snoise"));
    assert!(heart_core::SCENE_WGSL.contains("fn vs_main"));
    assert!(heart_core::STARS_WGSL.contains("fn vs_main"));
    assert!(heart_core::STARS_WGSL.contains("fn fs_main"));
}
