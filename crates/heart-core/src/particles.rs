//! Static per-particle attributes for the heart field.

use crate::constants::{
    HEART_DEPTH_SPAN, HEART_RADIUS_JITTER, HEART_RADIUS_MIN, LIFE_MIN, LIFE_SPAN,
    RANDOM_SEED_SPAN,
};
use glam::{Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

/// Point on the parametric heart curve for parameter `t` (unscaled).
///
/// `t = 0` is the top cleft at `(0, 5)`; `t = π` is the bottom tip.
#[inline]
pub fn heart_curve(t: f32) -> Vec2 {
    let s = t.sin();
    Vec2::new(
        16.0 * s * s * s,
        13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos(),
    )
}

/// The random draws behind one particle's rest position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeartSample {
    /// Curve parameter in `[0, 2π)`.
    pub t: f32,
    /// Radial scale in `[0.15, 0.17)`.
    pub radius: f32,
    /// Depth jitter in `[-2, 2)` before radial scaling.
    pub depth: f32,
}

impl HeartSample {
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        Self {
            t: rng.gen::<f32>() * TAU,
            radius: HEART_RADIUS_MIN + rng.gen::<f32>() * HEART_RADIUS_JITTER,
            depth: (rng.gen::<f32>() - 0.5) * HEART_DEPTH_SPAN,
        }
    }

    pub fn position(&self) -> Vec3 {
        heart_curve(self.t).extend(self.depth) * self.radius
    }
}

#[inline]
fn centered<R: Rng>(rng: &mut R) -> f32 {
    (rng.gen::<f32>() - 0.5) * RANDOM_SEED_SPAN
}

/// One GPU instance record; matches the instance attributes of `particles.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub scale: f32,
    pub random: [f32; 3],
    pub life: f32,
}

/// Immutable attribute arrays, one entry per particle.
#[derive(Clone, Debug)]
pub struct ParticleAttributes {
    pub positions: Vec<Vec3>,
    pub randoms: Vec<Vec3>,
    pub scales: Vec<f32>,
    pub lifes: Vec<f32>,
}

impl ParticleAttributes {
    /// Build `count` particles from a seeded generator. Same seed, same field.
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate_with(count, &mut rng)
    }

    pub fn generate_with<R: Rng>(count: usize, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut randoms = Vec::with_capacity(count);
        let mut scales = Vec::with_capacity(count);
        let mut lifes = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push(HeartSample::draw(rng).position());
            scales.push(rng.gen::<f32>());
            lifes.push(LIFE_MIN + rng.gen::<f32>() * LIFE_SPAN);
            randoms.push(Vec3::new(centered(rng), centered(rng), centered(rng)));
        }
        Self {
            positions,
            randoms,
            scales,
            lifes,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Interleave into the instance layout uploaded to the GPU.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        (0..self.len())
            .map(|i| ParticleInstance {
                position: self.positions[i].to_array(),
                scale: self.scales[i],
                random: self.randoms[i].to_array(),
                life: self.lifes[i],
            })
            .collect()
    }
}
