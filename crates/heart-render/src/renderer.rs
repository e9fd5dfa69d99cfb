use crate::context::GpuContext;
use crate::helpers::{
    line_vertex_layout, make_pipeline, particle_vertex_layouts, star_vertex_layouts,
    uniform_binding, vertex_buffer, ADDITIVE_BLENDING, QUAD_VERTICES,
};
use heart_core::solar::SolarSystem;
use heart_core::{
    LineVertex, ParticleAttributes, ParticleInstance, ParticleUniforms, SceneUniforms,
    StarInstance, StarUniforms, PARTICLES_WGSL, SCENE_WGSL, STARS_WGSL,
};
use wgpu::util::DeviceExt;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Everything drawn in one frame, besides the static buffers.
pub struct FrameInputs<'a> {
    pub particles: &'a ParticleUniforms,
    pub scene: &'a SceneUniforms,
    pub stars: &'a StarUniforms,
    pub solar: &'a SolarSystem,
    pub time: f32,
}

/// Stars, lines and cores first, particles on top. No depth buffer: draw
/// order decides what covers what.
pub struct Renderer {
    particle_pipeline: wgpu::RenderPipeline,
    particle_uniforms: wgpu::Buffer,
    particle_bind_group: wgpu::BindGroup,
    quad_vb: wgpu::Buffer,
    instance_vb: wgpu::Buffer,
    instance_count: u32,

    star_pipeline: wgpu::RenderPipeline,
    star_uniforms: wgpu::Buffer,
    star_bind_group: wgpu::BindGroup,
    star_vb: wgpu::Buffer,
    star_count: u32,

    line_pipeline: wgpu::RenderPipeline,
    core_pipeline: wgpu::RenderPipeline,
    scene_uniforms: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    line_vb: wgpu::Buffer,
    line_capacity: usize,
    line_count: u32,
    core_vb: wgpu::Buffer,
    core_capacity: usize,
    core_count: u32,
    // Reused every frame for the backdrop lines and cores
    scratch: Vec<LineVertex>,
}

impl Renderer {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        particles: &ParticleAttributes,
        solar: &SolarSystem,
    ) -> Self {
        // Particle field: instance buffer uploaded once, never rewritten
        let particle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("particles_shader"),
            source: wgpu::ShaderSource::Wgsl(PARTICLES_WGSL.into()),
        });
        let (particle_uniforms, particle_bgl, particle_bind_group) = uniform_binding(
            device,
            "particle_uniforms",
            std::mem::size_of::<ParticleUniforms>() as u64,
        );
        let particle_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("particle_pl"),
            bind_group_layouts: &[&particle_bgl],
            push_constant_ranges: &[],
        });
        let particle_pipeline = make_pipeline(
            device,
            "particle_pipeline",
            &particle_pl,
            &particle_shader,
            &particle_vertex_layouts(),
            wgpu::PrimitiveTopology::TriangleList,
            format,
            ADDITIVE_BLENDING,
        );
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instances = particles.instances();
        let instance_vb = vertex_buffer::<ParticleInstance>(device, "instance_vb", instances.len());
        if !instances.is_empty() {
            queue.write_buffer(&instance_vb, 0, bytemuck::cast_slice(&instances));
        }

        // Star sprites: instanced like the particles, static after upload
        let star_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("stars_shader"),
            source: wgpu::ShaderSource::Wgsl(STARS_WGSL.into()),
        });
        let (star_uniforms, star_bgl, star_bind_group) = uniform_binding(
            device,
            "star_uniforms",
            std::mem::size_of::<StarUniforms>() as u64,
        );
        let star_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("star_pl"),
            bind_group_layouts: &[&star_bgl],
            push_constant_ranges: &[],
        });
        let star_pipeline = make_pipeline(
            device,
            "star_pipeline",
            &star_pl,
            &star_shader,
            &star_vertex_layouts(),
            wgpu::PrimitiveTopology::TriangleList,
            format,
            ADDITIVE_BLENDING,
        );
        let stars = solar.stars();
        let star_vb = vertex_buffer::<StarInstance>(device, "star_vb", stars.len());
        if !stars.is_empty() {
            queue.write_buffer(&star_vb, 0, bytemuck::cast_slice(stars));
        }

        // Backdrop: one shader, line and triangle topologies
        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let (scene_uniforms, scene_bgl, scene_bind_group) = uniform_binding(
            device,
            "scene_uniforms",
            std::mem::size_of::<SceneUniforms>() as u64,
        );
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let line_pipeline = make_pipeline(
            device,
            "line_pipeline",
            &scene_pl,
            &scene_shader,
            &[line_vertex_layout()],
            wgpu::PrimitiveTopology::LineList,
            format,
            wgpu::BlendState::ALPHA_BLENDING,
        );
        let core_pipeline = make_pipeline(
            device,
            "core_pipeline",
            &scene_pl,
            &scene_shader,
            &[line_vertex_layout()],
            wgpu::PrimitiveTopology::TriangleList,
            format,
            wgpu::BlendState::ALPHA_BLENDING,
        );

        let mut scratch = Vec::new();
        solar.write_lines(0.0, &mut scratch);
        let line_capacity = scratch.len();
        let line_vb = vertex_buffer::<LineVertex>(device, "line_vb", line_capacity);
        if !scratch.is_empty() {
            queue.write_buffer(&line_vb, 0, bytemuck::cast_slice(&scratch));
        }

        solar.write_triangles(0.0, &mut scratch);
        let core_capacity = scratch.len();
        let core_vb = vertex_buffer::<LineVertex>(device, "core_vb", core_capacity);
        if !scratch.is_empty() {
            queue.write_buffer(&core_vb, 0, bytemuck::cast_slice(&scratch));
        }

        log::info!(
            "[render] {} particles, {} line vertices, {} core vertices, {} stars",
            instances.len(),
            line_capacity,
            core_capacity,
            stars.len()
        );

        Self {
            particle_pipeline,
            particle_uniforms,
            particle_bind_group,
            quad_vb,
            instance_vb,
            instance_count: instances.len() as u32,
            star_pipeline,
            star_uniforms,
            star_bind_group,
            star_vb,
            star_count: stars.len() as u32,
            line_pipeline,
            core_pipeline,
            scene_uniforms,
            scene_bind_group,
            line_vb,
            line_capacity,
            line_count: line_capacity as u32,
            core_vb,
            core_capacity,
            core_count: core_capacity as u32,
            scratch,
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }

    /// Upload this frame's uniforms, backdrop lines and planet cores.
    pub fn prepare(&mut self, queue: &wgpu::Queue, inputs: &FrameInputs<'_>) {
        queue.write_buffer(&self.particle_uniforms, 0, bytemuck::bytes_of(inputs.particles));
        queue.write_buffer(&self.scene_uniforms, 0, bytemuck::bytes_of(inputs.scene));
        queue.write_buffer(&self.star_uniforms, 0, bytemuck::bytes_of(inputs.stars));

        inputs.solar.write_lines(inputs.time, &mut self.scratch);
        self.line_count = upload_capped(queue, &self.line_vb, &mut self.scratch, self.line_capacity);
        inputs.solar.write_triangles(inputs.time, &mut self.scratch);
        self.core_count = upload_capped(queue, &self.core_vb, &mut self.scratch, self.core_capacity);
    }

    /// Record the backdrop and particle passes into `encoder`.
    pub fn encode(&self, encoder: &mut wgpu::CommandEncoder, target: &wgpu::TextureView) {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if self.star_count > 0 {
            rpass.set_pipeline(&self.star_pipeline);
            rpass.set_bind_group(0, &self.star_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.star_vb.slice(..));
            rpass.draw(0..6, 0..self.star_count);
        }

        rpass.set_bind_group(0, &self.scene_bind_group, &[]);
        rpass.set_pipeline(&self.line_pipeline);
        rpass.set_vertex_buffer(0, self.line_vb.slice(..));
        rpass.draw(0..self.line_count, 0..1);
        rpass.set_pipeline(&self.core_pipeline);
        rpass.set_vertex_buffer(0, self.core_vb.slice(..));
        rpass.draw(0..self.core_count, 0..1);

        if self.instance_count > 0 {
            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_bind_group(0, &self.particle_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..6, 0..self.instance_count);
        }
    }

    /// Prepare, encode and present one frame on `gpu`'s surface.
    pub fn render(
        &mut self,
        gpu: &GpuContext<'_>,
        inputs: &FrameInputs<'_>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = gpu.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.prepare(&gpu.queue, inputs);
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });
        self.encode(&mut encoder, &view);
        gpu.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Write `vertices` into `buffer`, truncated to `capacity`; returns the count.
fn upload_capped(
    queue: &wgpu::Queue,
    buffer: &wgpu::Buffer,
    vertices: &mut Vec<LineVertex>,
    capacity: usize,
) -> u32 {
    if vertices.len() > capacity {
        log::warn!(
            "[render] backdrop grew to {} vertices, truncating to {}",
            vertices.len(),
            capacity
        );
        vertices.truncate(capacity);
    }
    if !vertices.is_empty() {
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(vertices));
    }
    vertices.len() as u32
}
