use crate::device::DEPTH_FORMAT;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{override_bool, subtractive_blend, FrameBinding, QuadBuffers, QuadVertex};
use super::uniforms::FrameUniforms;

/// Pipeline-time parameters of the pointer marker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CursorStyle {
    /// Marker diameter in device-independent units.
    pub size: f32,
    pub color: Color,
    /// Alpha at the marker's center.
    pub max_alpha: f32,
    /// Soft edges via `fwidth`; `false` draws a hard-edged disc.
    pub antialias: bool,
}

impl Default for CursorStyle {
    fn default() -> Self {
        Self {
            size: 42.0,
            color: Color::rgb(0.8, 0.3, 0.1),
            max_alpha: 0.3,
            antialias: true,
        }
    }
}

impl CursorStyle {
    /// Values for the `override` declarations in `shaders/cursor.wgsl`.
    pub fn pipeline_constants(&self) -> [(&'static str, f64); 6] {
        [
            ("antialias", override_bool(self.antialias)),
            ("cursor_size", self.size as f64),
            ("max_alpha", self.max_alpha as f64),
            ("color_r", self.color.r as f64),
            ("color_g", self.color.g as f64),
            ("color_b", self.color.b as f64),
        ]
    }
}

/// Draws a single disc at the pointer.
///
/// Blends subtractively and depth-tests against the frame's depth buffer
/// (compare `Less`, writes on), unlike the particle pass.
pub struct CursorRenderer {
    style: CursorStyle,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    binding: Option<FrameBinding>,
    quad: Option<QuadBuffers>,
}

impl CursorRenderer {
    pub fn new(style: CursorStyle) -> Self {
        Self {
            style,
            pipeline_format: None,
            pipeline: None,
            binding: None,
            quad: None,
        }
    }

    pub fn style(&self) -> CursorStyle {
        self.style
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        frame: &FrameUniforms,
    ) {
        self.ensure_bindings(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);

        let Some(binding) = self.binding.as_ref() else { return };
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(quad) = self.quad.as_ref() else { return };

        binding.write(ctx.queue, frame);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("speck cursor pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &binding.bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..quad.index_count(), 0, 0..1);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.binding.is_none() {
            self.binding = Some(FrameBinding::new(ctx.device, "speck cursor"));
        }
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad.is_none() {
            self.quad = Some(QuadBuffers::new(ctx.device, "speck cursor"));
        }
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let Some(binding) = self.binding.as_ref() else { return };

        log::debug!("building cursor pipeline for {:?}", ctx.surface_format);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("speck cursor shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/cursor.wgsl").into()),
        });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("speck cursor pipeline layout"),
                bind_group_layouts: &[&binding.layout],
                immediate_size: 0,
            });

        let constants = self.style.pipeline_constants();

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("speck cursor pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &constants,
                    ..Default::default()
                },
                buffers: &[QuadVertex::layout()],
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
                    blend: Some(subtractive_blend()),
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }
}

impl Default for CursorRenderer {
    fn default() -> Self {
        Self::new(CursorStyle::default())
    }
}
