//! Drag-to-orbit camera control. Rotation about the target only; the
//! distance and the target never change.

use crate::constants::{ORBIT_DAMPING, ORBIT_POLAR_EPS, ORBIT_ROTATE_SPEED};
use crate::state::Camera;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Spherical position of the eye around `target`, with damped rotation.
///
/// `theta` is the azimuth about +Y measured from +Z, `phi` the polar angle
/// from +Y. Drags queue rotation; each `update` applies a fixed share of what
/// is still queued, so the camera eases to a stop after the pointer does.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    target: Vec3,
    radius: f32,
    theta: f32,
    phi: f32,
    pending: Vec2,
}

impl OrbitControls {
    pub fn for_camera(camera: &Camera) -> Self {
        let offset = camera.eye - camera.target;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            target: camera.target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            pending: Vec2::ZERO,
        }
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    /// Queue a pointer drag of `delta` pixels on a viewport `viewport_height`
    /// pixels tall. Dragging right or down turns the scene with the pointer.
    pub fn drag(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 || !delta.is_finite() {
            return;
        }
        self.pending -= delta * (TAU * ORBIT_ROTATE_SPEED / viewport_height);
    }

    /// Apply one frame of damped rotation and move `camera` to match.
    pub fn update(&mut self, camera: &mut Camera) {
        let step = self.pending * ORBIT_DAMPING;
        self.pending -= step;
        self.theta += step.x;
        self.phi = (self.phi + step.y).clamp(ORBIT_POLAR_EPS, PI - ORBIT_POLAR_EPS);
        camera.target = self.target;
        camera.eye = self.eye();
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.phi.sin();
        self.target
            + self.radius * Vec3::new(s * self.theta.sin(), self.phi.cos(), s * self.theta.cos())
    }
}
