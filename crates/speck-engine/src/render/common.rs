//! Shared GPU types and utilities used by the point-sprite renderers.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::uniforms::{FrameUniformRaw, FrameUniforms};

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight-alpha "source over": `src * a + dst * (1 - a)` on rgb and alpha.
pub(super) fn source_over_blend() -> wgpu::BlendState {
    blend_with(wgpu::BlendOperation::Add)
}

/// Same factors as [`source_over_blend`] but `src - dst`: the sprite removes
/// light from what is already in the target.
pub(super) fn subtractive_blend() -> wgpu::BlendState {
    blend_with(wgpu::BlendOperation::Subtract)
}

fn blend_with(operation: wgpu::BlendOperation) -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

/// Sprite-space quad corner.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub corner: [f32; 2], // -1..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { corner: [-1.0, -1.0] },
    QuadVertex { corner: [1.0, -1.0] },
    QuadVertex { corner: [1.0, 1.0] },
    QuadVertex { corner: [-1.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Static quad vertex + index buffers.
pub(super) struct QuadBuffers {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl QuadBuffers {
    pub(super) fn new(device: &wgpu::Device, label: &str) -> Self {
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad vbo")),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad ibo")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }

    pub(super) fn index_count(&self) -> u32 {
        QUAD_INDICES.len() as u32
    }
}

// ── frame uniform binding ─────────────────────────────────────────────────

/// Returns the `wgpu` minimum binding size for the frame uniform buffer.
///
/// `FrameUniformRaw` is 32 bytes, so this never fails.
pub(super) fn frame_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<FrameUniformRaw>() as u64)
        .expect("FrameUniformRaw has non-zero size by construction")
}

/// Bind group layout + buffer + bind group for `@group(0) @binding(0)`.
pub(super) struct FrameBinding {
    pub layout: wgpu::BindGroupLayout,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl FrameBinding {
    pub(super) fn new(device: &wgpu::Device, label: &str) -> Self {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} bgl")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(frame_ubo_min_binding_size()),
                },
                count: None,
            }],
        });

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} frame ubo")),
            size: std::mem::size_of::<FrameUniformRaw>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            layout,
            buffer,
            bind_group,
        }
    }

    pub(super) fn write(&self, queue: &wgpu::Queue, frame: &FrameUniforms) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&frame.to_gpu()));
    }
}

// ── pipeline constants ────────────────────────────────────────────────────

/// Boolean value for a WGSL `override` constant.
#[inline]
pub(super) fn override_bool(v: bool) -> f64 {
    if v { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::render::sprite::{blend_unorm, disc_alpha, sprite_radial};
    use crate::scene::SceneConfig;

    const DELTA: f32 = 0.05;

    fn cleared() -> [f32; 4] {
        let c = SceneConfig::default().clear_color;
        [c.r, c.g, c.b, c.a]
    }

    fn cursor_fragment(corner: Vec2) -> Option<[f32; 4]> {
        let cfg = SceneConfig::default();
        let alpha = disc_alpha(sprite_radial(corner), Some(DELTA), cfg.cursor_max_alpha)?;
        let [r, g, b] = cfg.cursor_color.rgb_array();
        Some([r, g, b, alpha])
    }

    #[test]
    fn quad_corners_span_unit_square() {
        for v in QUAD_VERTICES {
            assert_eq!(v.corner[0].abs(), 1.0);
            assert_eq!(v.corner[1].abs(), 1.0);
        }
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn blends_differ_only_in_operation() {
        let over = source_over_blend();
        let sub = subtractive_blend();
        assert_eq!(over.color.operation, wgpu::BlendOperation::Add);
        assert_eq!(sub.color.operation, wgpu::BlendOperation::Subtract);
        assert_eq!(sub.alpha.operation, wgpu::BlendOperation::Subtract);
        assert_eq!(over.color.src_factor, sub.color.src_factor);
        assert_eq!(over.alpha.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }

    #[test]
    fn cursor_corner_leaves_target_untouched() {
        assert_eq!(cursor_fragment(Vec2::new(1.0, 1.0)), None);
        assert_eq!(cursor_fragment(Vec2::new(0.9, 0.9)), None);
    }

    #[test]
    fn cursor_center_cuts_translucent_hole() {
        let src = cursor_fragment(Vec2::new(0.0, 0.0)).expect("center is covered");
        let out = blend_unorm(subtractive_blend(), src, cleared());

        assert_eq!(&out[..3], &[0.0, 0.0, 0.0]);
        assert!((out[3] - 0.09).abs() < 1e-6, "alpha {}", out[3]);
    }

    #[test]
    fn opaque_particle_over_clear_keeps_its_gray() {
        let cfg = SceneConfig::default();
        let alpha = disc_alpha(0.0, Some(DELTA), 1.0).expect("center is covered");
        let [r, g, b] = cfg.particle_color.rgb_array();
        let out = blend_unorm(source_over_blend(), [r, g, b, alpha], cleared());

        for c in &out[..3] {
            assert!((c - 0.7).abs() < 1e-6);
        }
        assert_eq!(out[3], 1.0);
    }
}
