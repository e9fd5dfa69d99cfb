//! CPU mirror of the scalar math in `shaders/particles.wgsl`.
//!
//! The GPU does the real work; these functions exist so the visual contract
//! (heartbeat fade, explosion easing, sprite size, flash, glow cutout) can be
//! checked on the host. Keep both sides in step when tuning.

use crate::constants::*;
use glam::Vec3;

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Square-root easing: fast at first, settling near full extent.
#[inline]
pub fn explode_curve(explode: f32) -> f32 {
    explode.max(0.0).sqrt()
}

/// Radial heartbeat scale; fades out completely by `explode = 0.3`.
#[inline]
pub fn beat_scale(explode: f32, time: f32) -> f32 {
    let beat_factor = 1.0 - smoothstep(0.0, BEAT_FADE_END, explode);
    1.0 + beat_factor * BEAT_AMP * (time * BEAT_FREQ).sin()
}

/// Outward displacement along the particle's jittered direction.
#[inline]
pub fn explosion_offset(position: Vec3, random: Vec3, curve: f32) -> Vec3 {
    (position + random * 0.5).normalize_or_zero() * (curve * EXPLOSION_DISTANCE)
}

/// Sprite size in pixels, before the GPU's NDC conversion.
#[inline]
pub fn point_size(scale: f32, curve: f32, pixel_ratio: f32, view_z: f32) -> f32 {
    let size_mix = POINT_SIZE_COLLAPSED + (POINT_SIZE_EXPLODED - POINT_SIZE_COLLAPSED) * curve;
    scale * size_mix * pixel_ratio / -view_z
}

/// Soft radial falloff; `dist` is measured from the sprite center (0..~0.71).
#[inline]
pub fn glow_strength(dist: f32) -> f32 {
    (0.1 / (dist + 0.05) - 0.1).clamp(0.0, 1.0)
}

/// White-hot overlay peaking mid-explosion, zero at both extremes.
#[inline]
pub fn flash_intensity(curve: f32) -> f32 {
    smoothstep(0.0, 0.4, curve) * (1.0 - smoothstep(0.6, 1.0, curve)) * 2.0
}

#[inline]
pub fn breathe(time: f32) -> f32 {
    (time * BREATHE_SPEED).sin() * 0.2 + 0.8
}

/// Final fragment alpha, or `None` where the fragment is discarded.
#[inline]
pub fn fragment_alpha(dist: f32, life: f32, time: f32) -> Option<f32> {
    let alpha = glow_strength(dist) * life * breathe(time);
    (alpha >= ALPHA_CUTOFF).then_some(alpha)
}

/// Base color blended from `a` toward `b` with distance from the origin.
#[inline]
pub fn base_color(world_pos: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    a.lerp(b, world_pos.length() * COLOR_MIX_PER_UNIT)
}
