use heart_core::solar::SolarSystem;
use heart_core::{
    AnimationDriver, Camera, HandPair, OrbitControls, ParticleAttributes, ParticleUniforms,
    SceneConfig, SceneUniforms, StarUniforms,
};
use heart_render::{FrameInputs, GpuContext, Renderer};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Render-loop state: GPU resources plus the smoothed animation.
pub struct SceneRenderer {
    canvas: web::HtmlCanvasElement,
    gpu: GpuContext<'static>,
    renderer: Renderer,
    driver: AnimationDriver,
    solar: SolarSystem,
    camera: Camera,
    orbit: Rc<RefCell<OrbitControls>>,
    config: SceneConfig,
    start: Instant,
}

impl SceneRenderer {
    pub async fn new(canvas: web::HtmlCanvasElement, config: SceneConfig) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let gpu = GpuContext::new(&instance, surface, canvas.width(), canvas.height()).await?;

        let particles = ParticleAttributes::generate(config.particle_count, config.seed);
        let solar = SolarSystem::new(config.seed);
        let renderer = Renderer::new(&gpu.device, &gpu.queue, gpu.format(), &particles, &solar);
        let camera = Camera::scene(gpu.aspect());
        let orbit = Rc::new(RefCell::new(OrbitControls::for_camera(&camera)));
        log::info!(
            "[render] scene ready: {} particles, seed {:#x}",
            config.particle_count,
            config.seed
        );

        Ok(Self {
            canvas,
            gpu,
            renderer,
            driver: AnimationDriver::new(config.color_a, config.color_b),
            solar,
            camera,
            orbit,
            config,
            start: Instant::now(),
        })
    }

    /// Orbit state shared with the canvas pointer listeners.
    pub fn orbit(&self) -> Rc<RefCell<OrbitControls>> {
        self.orbit.clone()
    }

    /// Advance the animation one frame from `hands` and draw it.
    pub fn frame(&mut self, hands: &HandPair) {
        // Keep the surface sized to the canvas backing store
        let size = (self.canvas.width(), self.canvas.height());
        if size != self.gpu.size() {
            self.gpu.resize(size.0, size.1);
        }
        self.camera.aspect = self.gpu.aspect();
        self.orbit.borrow_mut().update(&mut self.camera);

        let dpr = web::window()
            .map(|w| w.device_pixel_ratio() as f32)
            .unwrap_or(1.0);
        let time = self.start.elapsed().as_secs_f32();
        let frame = self
            .driver
            .frame(hands, time, self.config.pixel_ratio(dpr));
        self.solar.advance();

        let (w, h) = self.gpu.size();
        let particles = ParticleUniforms::new(&frame, &self.camera, [w as f32, h as f32]);
        let scene = SceneUniforms::new(&self.camera);
        let stars = StarUniforms::new(&self.camera, [w as f32, h as f32], time);
        let inputs = FrameInputs {
            particles: &particles,
            scene: &scene,
            stars: &stars,
            solar: &self.solar,
            time,
        };
        match self.renderer.render(&self.gpu, &inputs) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.gpu.size();
                self.gpu.resize(w, h);
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}
