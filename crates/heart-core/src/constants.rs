//! Tuning constants shared by the web and native front-ends.
//!
//! Keeping these in one table keeps magic numbers out of the gesture and
//! animation code and lets tests assert their relationships.

// Gesture classification
pub const LANDMARK_COUNT: usize = 21;
pub const FIST_RATIO: f32 = 1.2; // fingertips closer than base size * ratio => fist
pub const PINCH_DISTANCE: f32 = 0.05; // normalized image units, not scaled by hand size
pub const SIDE_SPLIT_X: f32 = 0.5; // knuckle x below this is the (mirrored) right hand

// Hand size -> explosion mapping (hand size is a proxy for distance to camera)
pub const HAND_SIZE_FAR: f32 = 0.08; // far hand => fully exploded
pub const HAND_SIZE_CLOSE: f32 = 0.22; // close hand => collapsed heart

// Hand position -> scene mapping
pub const OFFSET_GAIN_X: f32 = -15.0;
pub const OFFSET_GAIN_Y: f32 = -10.0;
pub const ROTATION_GAIN: f32 = 0.08; // radians per frame per unit of x off-center
pub const BASELINE_ROTATION_SPEED: f32 = 0.002; // radians per frame with no hand

// Per-frame smoothing factors (current += (target - current) * alpha)
pub const OFFSET_ALPHA: f32 = 0.05;
pub const EXPLODE_COLLAPSE_ALPHA: f32 = 0.08; // target below current
pub const EXPLODE_EXPAND_ALPHA: f32 = 0.02; // target above current
pub const SCALE_ALPHA: f32 = 0.05;

// Object scale follows explosion: 0 -> 1.0, 1 -> 1.5
pub const OBJECT_SCALE_REST: f32 = 1.0;
pub const OBJECT_SCALE_EXPLODED: f32 = 1.5;

// Particle field
pub const PARTICLE_COUNT: usize = 60_000;
pub const MAX_PARTICLES: usize = 1_000_000; // 32 MB of instances, well under the default max_buffer_size
pub const PARTICLE_SEED: u64 = 0x4845_4152_54; // "HEART"
pub const HEART_RADIUS_MIN: f32 = 0.15;
pub const HEART_RADIUS_JITTER: f32 = 0.02;
pub const HEART_DEPTH_SPAN: f32 = 4.0; // uniform in [-2, 2] before radius scaling
pub const RANDOM_SEED_SPAN: f32 = 4.0; // explosion direction noise per axis, [-2, 2]
pub const LIFE_MIN: f32 = 0.4;
pub const LIFE_SPAN: f32 = 0.6;

// Palette
pub const COLOR_A_HEX: &str = "#FF0055";
pub const COLOR_B_HEX: &str = "#00FFFF";

// Shader constants (mirrored in shaders/particles.wgsl)
pub const BEAT_FREQ: f32 = 6.0;
pub const BEAT_AMP: f32 = 0.08;
pub const BEAT_FADE_END: f32 = 0.3; // heartbeat gone once explode reaches this
pub const NOISE_FREQ: f32 = 0.1;
pub const NOISE_SPEED: f32 = 0.5;
pub const NOISE_GAIN: f32 = 8.0;
pub const EXPLOSION_DISTANCE: f32 = 60.0;
pub const POINT_SIZE_COLLAPSED: f32 = 220.0;
pub const POINT_SIZE_EXPLODED: f32 = 60.0;
pub const COLOR_MIX_PER_UNIT: f32 = 0.03;
pub const FLASH_COLOR: [f32; 3] = [1.0, 0.95, 0.8];
pub const BREATHE_SPEED: f32 = 3.0;
pub const ALPHA_CUTOFF: f32 = 0.01;

// Display
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 2.0, 10.0];
pub const CAMERA_FOV_DEG: f32 = 50.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Drag-to-orbit (rotation only, no zoom or pan)
pub const ORBIT_ROTATE_SPEED: f32 = 1.0; // a drag across the viewport height turns a full circle
pub const ORBIT_DAMPING: f32 = 0.05; // share of the queued rotation applied per frame
pub const ORBIT_POLAR_EPS: f32 = 1e-6; // keeps the eye off the poles

// Detection cadence for sources that are not tied to a video element
pub const DETECTION_INTERVAL_MS: u64 = 33;
