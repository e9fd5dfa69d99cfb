//! Uniform and vertex layouts shared by the renderers and the WGSL sources.

use crate::animation::AnimationFrame;
use crate::state::Camera;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub color_a: [f32; 4],
    pub color_b: [f32; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub pixel_ratio: f32,
    pub explode: f32,
    pub _pad: [f32; 3],
}

impl ParticleUniforms {
    pub fn new(frame: &AnimationFrame, camera: &Camera, resolution: [f32; 2]) -> Self {
        let u = &frame.uniforms;
        Self {
            model: frame.transform.model_matrix().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            color_a: [u.color_a[0], u.color_a[1], u.color_a[2], 1.0],
            color_b: [u.color_b[0], u.color_b[1], u.color_b[2], 1.0],
            resolution,
            time: u.time,
            pixel_ratio: u.pixel_ratio,
            explode: u.explode,
            _pad: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    // xyz: camera eye, w unused
    pub eye: [f32; 4],
}

impl SceneUniforms {
    pub fn new(camera: &Camera) -> Self {
        Self {
            view_proj: (camera.projection_matrix() * camera.view_matrix()).to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
        }
    }
}

/// World-space vertex for the backdrop's lines and solid planet cores.
///
/// `fade` > 0 dims the vertex with distance from the camera (grid only).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub fade: f32,
    pub color: [f32; 4],
}

/// One star sprite: world position, base size and color.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

impl StarUniforms {
    pub fn new(camera: &Camera, resolution: [f32; 2], time: f32) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            resolution,
            time,
            _pad: 0.0,
        }
    }
}
