//! wgpu rendering for the heart particle field and its solar backdrop,
//! shared by the web and native front-ends.

pub mod context;
pub mod helpers;
pub mod renderer;

pub use context::GpuContext;
pub use renderer::{FrameInputs, Renderer};
