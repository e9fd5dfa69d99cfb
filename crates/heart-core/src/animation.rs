//! Per-frame mapping from hand readings to particle-field motion.
//!
//! All smoothing here is per *frame*, not per second: the field follows its
//! targets with `current += (target - current) * alpha` once per render tick.

use crate::constants::*;
use crate::gesture::{HandPair, HandReading};
use glam::{Mat4, Quat, Vec2, Vec3};

/// Linear remap of `x` from `[a1, a2]` onto `[b1, b2]` (no clamping).
#[inline]
pub fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

/// Hand size to explosion amount: far (small) hand explodes, close hand
/// collapses. Sizes outside `[0.08, 0.22]` are clamped first.
#[inline]
pub fn map_explosion(hand_size: f32) -> f32 {
    let size = hand_size.clamp(HAND_SIZE_FAR, HAND_SIZE_CLOSE);
    map_linear(size, HAND_SIZE_FAR, HAND_SIZE_CLOSE, 1.0, 0.0)
}

/// One first-order smoothing step.
#[inline]
pub fn approach(current: f32, target: f32, alpha: f32) -> f32 {
    current + (target - current) * alpha
}

/// Collapsing back to the heart is fast, building up an explosion is slow.
#[inline]
pub fn explode_alpha(current: f32, target: f32) -> f32 {
    if target < current {
        EXPLODE_COLLAPSE_ALPHA
    } else {
        EXPLODE_EXPAND_ALPHA
    }
}

/// Object scale the field grows toward for a given explosion amount.
#[inline]
pub fn object_scale_for(explode: f32) -> f32 {
    map_linear(
        explode.min(1.0),
        0.0,
        1.0,
        OBJECT_SCALE_REST,
        OBJECT_SCALE_EXPLODED,
    )
}

/// Where the field wants to be this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionTargets {
    pub explode: f32,
    pub offset: Vec2,
    pub rotation_speed: f32,
}

impl MotionTargets {
    /// No hand: collapse into the heart, drift back to center, idle spin.
    pub const REST: MotionTargets = MotionTargets {
        explode: 0.0,
        offset: Vec2::ZERO,
        rotation_speed: BASELINE_ROTATION_SPEED,
    };

    pub fn for_hand(hand: Option<&HandReading>) -> Self {
        match hand {
            None => Self::REST,
            Some(h) => {
                let dx = h.center.x - 0.5;
                let dy = h.center.y - 0.5;
                Self {
                    explode: map_explosion(h.size),
                    offset: Vec2::new(dx * OFFSET_GAIN_X, dy * OFFSET_GAIN_Y),
                    rotation_speed: dx * ROTATION_GAIN,
                }
            }
        }
    }
}

/// Transform applied to the whole particle field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldTransform {
    pub offset: Vec2,
    pub scale: f32,
    pub rotation_y: f32,
}

impl FieldTransform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y),
            self.offset.extend(0.0),
        )
    }
}

/// Scalars pushed to the particle shader every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationUniforms {
    pub time: f32,
    pub pixel_ratio: f32,
    pub explode: f32,
    pub color_a: [f32; 3],
    pub color_b: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame {
    pub uniforms: AnimationUniforms,
    pub transform: FieldTransform,
    pub targets: MotionTargets,
}

/// Smoothed field state carried from one render frame to the next.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    offset: Vec2,
    explode: f32,
    scale: f32,
    rotation_y: f32,
    color_a: [f32; 3],
    color_b: [f32; 3],
}

impl AnimationDriver {
    pub fn new(color_a: [f32; 3], color_b: [f32; 3]) -> Self {
        Self {
            offset: Vec2::ZERO,
            explode: 0.0,
            scale: OBJECT_SCALE_REST,
            rotation_y: 0.0,
            color_a,
            color_b,
        }
    }

    pub fn explode(&self) -> f32 {
        self.explode
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Advance one render frame toward the targets implied by `hands`.
    pub fn step(&mut self, hands: &HandPair) -> (FieldTransform, MotionTargets) {
        let targets = MotionTargets::for_hand(hands.active());

        self.offset.x = approach(self.offset.x, targets.offset.x, OFFSET_ALPHA);
        self.offset.y = approach(self.offset.y, targets.offset.y, OFFSET_ALPHA);

        let alpha = explode_alpha(self.explode, targets.explode);
        self.explode = approach(self.explode, targets.explode, alpha);

        // Angular velocity integrator, intentionally unsmoothed
        self.rotation_y += targets.rotation_speed;

        self.scale = approach(self.scale, object_scale_for(self.explode), SCALE_ALPHA);

        (
            FieldTransform {
                offset: self.offset,
                scale: self.scale,
                rotation_y: self.rotation_y,
            },
            targets,
        )
    }

    /// Step and package everything the renderer needs for this frame.
    pub fn frame(&mut self, hands: &HandPair, time_sec: f32, pixel_ratio: f32) -> AnimationFrame {
        let (transform, targets) = self.step(hands);
        AnimationFrame {
            uniforms: AnimationUniforms {
                time: time_sec,
                pixel_ratio,
                explode: self.explode,
                color_a: self.color_a,
                color_b: self.color_b,
            },
            transform,
            targets,
        }
    }
}
