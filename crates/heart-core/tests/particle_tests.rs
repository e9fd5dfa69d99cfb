use glam::Vec2;
use heart_core::particles::HeartSample;
use heart_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

#[test]
fn heart_curve_cleft_and_tip() {
    let top = heart_curve(0.0);
    assert!((top - Vec2::new(0.0, 5.0)).length() < 1e-5);
    let tip = heart_curve(PI);
    assert!(tip.x.abs() < 1e-4);
    assert!((tip.y - -17.0).abs() < 1e-4);
}

#[test]
fn heart_curve_is_mirror_symmetric() {
    for i in 1..50 {
        let t = i as f32 * PI / 50.0;
        let a = heart_curve(t);
        let b = heart_curve(-t);
        assert!((a.x + b.x).abs() < 1e-4);
        assert!((a.y - b.y).abs() < 1e-4);
    }
}

#[test]
fn sample_at_zero_parameter_scales_cleft_by_radius() {
    let s = HeartSample {
        t: 0.0,
        radius: 0.16,
        depth: 0.0,
    };
    let p = s.position();
    assert!((p.y - 0.8).abs() < 1e-5);
    assert!(p.x.abs() < 1e-6 && p.z.abs() < 1e-6);
}

#[test]
fn attributes_stay_in_range() {
    let attrs = ParticleAttributes::generate(5_000, 7);
    assert_eq!(attrs.len(), 5_000);
    assert_eq!(attrs.randoms.len(), 5_000);
    for i in 0..attrs.len() {
        let s = attrs.scales[i];
        assert!((0.0..1.0).contains(&s));
        let l = attrs.lifes[i];
        assert!((0.4..=1.0).contains(&l));
        for c in attrs.randoms[i].to_array() {
            assert!((-2.0..2.0).contains(&c));
        }
        let p = attrs.positions[i];
        // 16 * 0.17 bounds x, 17 * 0.17 bounds y, 2 * 0.17 bounds z
        assert!(p.x.abs() <= 2.73 && p.y.abs() <= 2.9 && p.z.abs() <= 0.35);
    }
}

#[test]
fn same_seed_same_field() {
    let a = ParticleAttributes::generate(256, 99);
    let b = ParticleAttributes::generate(256, 99);
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.lifes, b.lifes);
    let c = ParticleAttributes::generate(256, 100);
    assert_ne!(a.positions, c.positions);
}

#[test]
fn generate_with_matches_seeded_generate() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = ParticleAttributes::generate_with(64, &mut rng);
    let b = ParticleAttributes::generate(64, 3);
    assert_eq!(a.randoms, b.randoms);
}

#[test]
fn instances_interleave_attributes() {
    let attrs = ParticleAttributes::generate(10, 1);
    let inst = attrs.instances();
    assert_eq!(inst.len(), 10);
    for (i, p) in inst.iter().enumerate() {
        assert_eq!(p.position, attrs.positions[i].to_array());
        assert_eq!(p.random, attrs.randoms[i].to_array());
        assert_eq!(p.scale, attrs.scales[i]);
        assert_eq!(p.life, attrs.lifes[i]);
    }
    assert_eq!(std::mem::size_of::<ParticleInstance>(), 32);
}

#[test]
fn empty_field_is_allowed() {
    let attrs = ParticleAttributes::generate(0, 1);
    assert!(attrs.is_empty());
    assert!(attrs.instances().is_empty());
}
