//! State shared between the detection loop and the render loop.
//!
//! These types avoid platform-specific APIs and are used by both the web and
//! native front-ends.

use crate::constants::{CAMERA_EYE, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};
use crate::gesture::{HandPair, HandReading, HandSide};
use glam::{Mat4, Vec3};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Slot {
    hands: HandPair,
    writes: u64,
}

/// Latest-wins cell holding the left/right hand readings.
///
/// Cloning yields another handle to the same cell. The detection loop
/// writes, the render loop reads; a read always returns both slots as they
/// were after some complete write, never a half-applied one.
#[derive(Clone, Debug, Default)]
pub struct SharedGestureState {
    inner: Arc<Mutex<Slot>>,
}

impl SharedGestureState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // Slot holds plain Copy data, so a poisoned guard is still consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace exactly one slot.
    pub fn write(&self, side: HandSide, reading: Option<HandReading>) {
        let mut slot = self.lock();
        slot.hands.set(side, reading);
        slot.writes += 1;
    }

    /// Replace both slots in one step.
    pub fn publish(&self, hands: HandPair) {
        let mut slot = self.lock();
        slot.hands = hands;
        slot.writes += 1;
    }

    pub fn read(&self) -> HandPair {
        self.lock().hands
    }

    /// Readings plus the number of writes seen so far.
    pub fn snapshot(&self) -> (HandPair, u64) {
        let slot = self.lock();
        (slot.hands, slot.writes)
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// The starting scene camera: slightly above the heart, looking at the origin.
    pub fn scene(aspect: f32) -> Self {
        Self {
            eye: Vec3::from(CAMERA_EYE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}
