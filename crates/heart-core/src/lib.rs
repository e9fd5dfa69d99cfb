pub mod animation;
pub mod config;
pub mod constants;
pub mod gesture;
pub mod gpu;
pub mod landmarks;
pub mod lifecycle;
pub mod orbit;
pub mod particles;
pub mod shading;
pub mod solar;
pub mod state;

pub use animation::*;
pub use config::*;
pub use constants::*;
pub use gesture::*;
pub use gpu::*;
pub use landmarks::{HandPose, Landmark, HAND_CONNECTIONS};
pub use lifecycle::Lifecycle;
pub use orbit::OrbitControls;
pub use particles::*;
pub use state::*;

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static STARS_WGSL: &str = include_str!("../shaders/stars.wgsl");
