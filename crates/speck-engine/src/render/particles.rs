use crate::render::{RenderCtx, RenderTarget};

use super::common::{override_bool, source_over_blend, FrameBinding, QuadBuffers, QuadVertex};
use super::point_buffer::{PointBuffer, PointRecord};
use super::sprite::SNAP_RADIUS;
use super::uniforms::FrameUniforms;

/// Pipeline-time parameters of the particle pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParticleStyle {
    /// NDC distance under which a particle snaps onto the pointer.
    pub snap_radius: f32,
    /// Soft edges via `fwidth`; `false` draws hard-edged discs.
    pub antialias: bool,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            snap_radius: SNAP_RADIUS,
            antialias: true,
        }
    }
}

impl ParticleStyle {
    /// Values for the `override` declarations in `shaders/particles.wgsl`.
    pub fn pipeline_constants(&self) -> [(&'static str, f64); 2] {
        [
            ("antialias", override_bool(self.antialias)),
            ("snap_radius", self.snap_radius as f64),
        ]
    }
}

/// Draws every record of a [`PointBuffer`] as a soft disc.
///
/// Depth testing is off: particles always draw and later instances win by
/// paint order. Blending is straight-alpha source-over.
pub struct ParticleRenderer {
    style: ParticleStyle,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    binding: Option<FrameBinding>,
    quad: Option<QuadBuffers>,
}

impl ParticleRenderer {
    pub fn new(style: ParticleStyle) -> Self {
        Self {
            style,
            pipeline_format: None,
            pipeline: None,
            binding: None,
            quad: None,
        }
    }

    pub fn style(&self) -> ParticleStyle {
        self.style
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        points: &mut PointBuffer,
        frame: &FrameUniforms,
    ) {
        if points.is_empty() {
            return;
        }

        self.ensure_bindings(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);

        let instances = points.len() as u32;
        let point_vbo = points.upload(ctx.device);

        let Some(binding) = self.binding.as_ref() else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };

        binding.write(ctx.queue, frame);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("speck particle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &binding.bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, point_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..quad.index_count(), 0, 0..instances);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.binding.is_none() {
            self.binding = Some(FrameBinding::new(ctx.device, "speck particle"));
        }
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "speck particle"));
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(binding) = self.binding.as_ref() else { return };

        log::debug!(
            "building particle pipeline for {:?} (antialias: {})",
            ctx.surface_format,
            self.style.antialias
        );

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("speck particle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/particles.wgsl").into()),
        });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("speck particle pipeline layout"),
                bind_group_layouts: &[&binding.layout],
                immediate_size: 0,
            });

        let constants = self.style.pipeline_constants();

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("speck particle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &constants,
                    ..Default::default()
                },
                buffers: &[QuadVertex::layout(), PointRecord::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &constants,
                    ..Default::default()
                },
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(source_over_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }
}

impl Default for ParticleRenderer {
    fn default() -> Self {
        Self::new(ParticleStyle::default())
    }
}
