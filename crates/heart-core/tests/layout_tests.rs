// Host-side layout checks for buffers shared with the WGSL sources.

use glam::Vec2;
use heart_core::*;
use std::mem::size_of;

#[test]
fn uniform_and_vertex_sizes_match_shaders() {
    assert_eq!(size_of::<ParticleUniforms>(), 256);
    assert_eq!(size_of::<SceneUniforms>(), 80);
    assert_eq!(size_of::<LineVertex>(), 32);
    assert_eq!(size_of::<ParticleInstance>(), 32);
    assert_eq!(size_of::<StarInstance>(), 32);
    assert_eq!(size_of::<StarUniforms>(), 144);
    assert_eq!(size_of::<StarUniforms>() % 16, 0);
    // uniform buffers must be a multiple of 16 bytes
    assert_eq!(size_of::<ParticleUniforms>() % 16, 0);
    assert_eq!(size_of::<SceneUniforms>() % 16, 0);
}

#[test]
fn particle_uniforms_carry_frame_values() {
    let mut driver = AnimationDriver::new([1.0, 0.0, 0.5], [0.0, 1.0, 1.0]);
    let hands = HandPair {
        left: None,
        right: Some(HandReading {
            center: Vec2::new(0.4, 0.5),
            size: 0.1,
            is_fist: false,
            is_pinching: false,
            gesture: Gesture::Open,
        }),
    };
    let frame = driver.frame(&hands, 3.0, 1.5);
    let camera = Camera::scene(1.0);
    let u = ParticleUniforms::new(&frame, &camera, [800.0, 600.0]);

    assert_eq!(u.time, 3.0);
    assert_eq!(u.pixel_ratio, 1.5);
    assert_eq!(u.explode, driver.explode());
    assert_eq!(u.resolution, [800.0, 600.0]);
    assert_eq!(u.color_a, [1.0, 0.0, 0.5, 1.0]);
    assert_eq!(u.model, frame.transform.model_matrix().to_cols_array_2d());
    assert_eq!(u.view, camera.view_matrix().to_cols_array_2d());

    let bytes: &[u8] = bytemuck::bytes_of(&u);
    assert_eq!(bytes.len(), 256);
}

#[test]
fn scene_uniforms_combine_view_and_projection() {
    let camera = Camera::scene(2.0);
    let s = SceneUniforms::new(&camera);
    let expected = camera.projection_matrix() * camera.view_matrix();
    assert_eq!(s.view_proj, expected.to_cols_array_2d());
    assert_eq!(&s.eye[..3], &CAMERA_EYE[..]);
}

#[test]
fn star_uniforms_follow_the_camera() {
    let mut camera = Camera::scene(1.0);
    let mut orbit = OrbitControls::for_camera(&camera);
    orbit.drag(Vec2::new(200.0, 0.0), 400.0);
    orbit.update(&mut camera);

    let u = StarUniforms::new(&camera, [640.0, 480.0], 2.5);
    assert_eq!(u.view, camera.view_matrix().to_cols_array_2d());
    assert_eq!(u.proj, camera.projection_matrix().to_cols_array_2d());
    assert_eq!(u.resolution, [640.0, 480.0]);
    assert_eq!(u.time, 2.5);
    assert_ne!(camera.eye, glam::Vec3::from(CAMERA_EYE));
}
