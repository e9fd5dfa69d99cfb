mod sim;

use glam::Vec2;
use heart_core::solar::SolarSystem;
use heart_core::{
    hud_text, AnimationDriver, Camera, OrbitControls, ParticleAttributes, ParticleUniforms,
    SceneConfig, SceneUniforms, SharedGestureState, StarUniforms,
};
use heart_render::{FrameInputs, GpuContext, Renderer};
use sim::{DetectionThread, SimInput};
use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

const TITLE: &str = "heartfield";
const PIXELS_PER_NOTCH: f32 = 50.0;

/// Environment variable -> `SceneConfig` override key.
const ENV_OVERRIDES: [(&str, &str); 4] = [
    ("HEARTFIELD_PARTICLES", "particles"),
    ("HEARTFIELD_SEED", "seed"),
    ("HEARTFIELD_COLOR_A", "color_a"),
    ("HEARTFIELD_COLOR_B", "color_b"),
];

fn config_from_env() -> SceneConfig {
    let vars: Vec<(&str, String)> = ENV_OVERRIDES
        .iter()
        .filter_map(|&(var, key)| std::env::var(var).ok().map(|v| (key, v)))
        .collect();
    SceneConfig::default().with_overrides(vars.iter().map(|(k, v)| (*k, v.as_str())))
}

struct NativeScene<'w> {
    window: &'w Window,
    gpu: GpuContext<'w>,
    renderer: Renderer,
    driver: AnimationDriver,
    solar: SolarSystem,
    camera: Camera,
    orbit: OrbitControls,
    orbiting: bool,
    // Last cursor position in physical pixels
    last_cursor: Option<Vec2>,
    config: SceneConfig,
    state: SharedGestureState,
    start: Instant,
    title: String,
}

impl<'w> NativeScene<'w> {
    async fn new(
        window: &'w Window,
        config: SceneConfig,
        state: SharedGestureState,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let gpu = GpuContext::new(&instance, surface, size.width, size.height).await?;

        let particles = ParticleAttributes::generate(config.particle_count, config.seed);
        let solar = SolarSystem::new(config.seed);
        let renderer = Renderer::new(&gpu.device, &gpu.queue, gpu.format(), &particles, &solar);
        let camera = Camera::scene(gpu.aspect());
        let orbit = OrbitControls::for_camera(&camera);
        log::info!(
            "[render] scene ready: {} particles, seed {:#x}",
            config.particle_count,
            config.seed
        );

        Ok(Self {
            window,
            gpu,
            renderer,
            driver: AnimationDriver::new(config.color_a, config.color_b),
            solar,
            camera,
            orbit,
            orbiting: false,
            last_cursor: None,
            config,
            state,
            start: Instant::now(),
            title: String::new(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size.width, new_size.height);
        self.camera.aspect = self.gpu.aspect();
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let hands = self.state.read();
        let status = hud_text(&hands);
        if status != self.title {
            self.window.set_title(&format!("{TITLE} | {status}"));
            self.title = status;
        }

        let time = self.start.elapsed().as_secs_f32();
        let pixel_ratio = self.config.pixel_ratio(self.window.scale_factor() as f32);
        let frame = self.driver.frame(&hands, time, pixel_ratio);
        self.solar.advance();
        self.orbit.update(&mut self.camera);

        let (w, h) = self.gpu.size();
        let particles = ParticleUniforms::new(&frame, &self.camera, [w as f32, h as f32]);
        let scene = SceneUniforms::new(&self.camera);
        let stars = StarUniforms::new(&self.camera, [w as f32, h as f32], time);
        self.renderer.render(
            &self.gpu,
            &FrameInputs {
                particles: &particles,
                scene: &scene,
                stars: &stars,
                solar: &self.solar,
                time,
            },
        )
    }

    /// Orbit while the middle button is held; otherwise the normalized
    /// cursor position for the simulated hand.
    fn cursor_moved(&mut self, position: winit::dpi::PhysicalPosition<f64>) -> Option<Vec2> {
        let px = Vec2::new(position.x as f32, position.y as f32);
        let size = self.window.inner_size();
        let prev = self.last_cursor.replace(px);
        if self.orbiting {
            if let Some(prev) = prev {
                self.orbit.drag(px - prev, size.height as f32);
            }
            return None;
        }
        Some(px / Vec2::new(size.width.max(1) as f32, size.height.max(1) as f32))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = config_from_env();
    let state = SharedGestureState::new();
    let detection = DetectionThread::spawn(state.clone())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new().with_title(TITLE).build(&event_loop)?;
    let mut scene = pollster::block_on(NativeScene::new(&window, config, state))?;
    log::info!("[sim] move the mouse to steer, scroll for distance, left button fist, right button pinch, H hides the hand; middle drag orbits the camera");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => scene.resize(size),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(cursor) = scene.cursor_moved(position) {
                    detection.send(SimInput::Cursor(cursor));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_NOTCH,
                };
                detection.send(SimInput::Scroll(notches));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let down = state == ElementState::Pressed;
                match button {
                    MouseButton::Left => detection.send(SimInput::Fist(down)),
                    MouseButton::Right => detection.send(SimInput::Pinch(down)),
                    MouseButton::Middle => scene.orbiting = down,
                    _ => {}
                }
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::KeyH) => detection.send(SimInput::ToggleVisible),
                    PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                    _ => {}
                }
            }
            _ => {}
        },
        Event::AboutToWait => match scene.render() {
            Ok(_) => scene.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                scene.resize(scene.window.inner_size())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(e) => log::warn!("render error: {:?}", e),
        },
        _ => {}
    })?;
    Ok(())
}
