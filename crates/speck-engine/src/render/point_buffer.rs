use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use rand::Rng;
use wgpu::util::DeviceExt;

use crate::coords::Vec2;
use crate::paint::Color;

/// One packed particle record (28 bytes).
///
///  offset  0  pos    [f32; 4]   loc 1  (.xy = position, .z = depth flag, .w = radius)
///  offset 16  color  [f32; 3]   loc 2
///
/// The GPU reads the same record through two attributes with one stride; the
/// first spans position + radius, the second the color right behind it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointRecord {
    pos: [f32; 4],
    color: [f32; 3],
}

impl PointRecord {
    pub const STRIDE: u64 = std::mem::size_of::<PointRecord>() as u64;
    pub const POS_RADIUS_OFFSET: u64 = std::mem::offset_of!(PointRecord, pos) as u64;
    pub const COLOR_OFFSET: u64 = std::mem::offset_of!(PointRecord, color) as u64;

    const ATTRS: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: Self::POS_RADIUS_OFFSET,
            shader_location: 1,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: Self::COLOR_OFFSET,
            shader_location: 2,
        },
    ];

    pub fn new(position: Vec2, depth_flag: f32, radius: f32, color: Color) -> Self {
        Self {
            pos: [position.x, position.y, depth_flag, radius],
            color: color.rgb_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.pos[0], self.pos[1])
    }

    #[inline]
    pub fn depth_flag(&self) -> f32 {
        self.pos[2]
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.pos[3]
    }

    #[inline]
    pub fn color(&self) -> Color {
        Color::rgb(self.color[0], self.color[1], self.color[2])
    }

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

/// Immutable particle field: CPU records plus their GPU copy.
///
/// Records are generated once. The GPU buffer is created on the first
/// [`upload`](Self::upload) and never written again.
pub struct PointBuffer {
    records: Vec<PointRecord>,
    gpu: Option<wgpu::Buffer>,
}

impl PointBuffer {
    /// Generates `count` records.
    ///
    /// Record `i`:
    /// - `x = (i / count) * 2 - 1`
    /// - `y = rand * 0.5 - 0.5 + i / count`
    /// - depth flag `1`
    /// - `radius = rand * 4π + 0.1`
    pub fn generate<R: Rng + ?Sized>(count: usize, color: Color, rng: &mut R) -> Self {
        let n = count as f32;
        let records = (0..count)
            .map(|i| {
                let t = i as f32 / n;
                let x = t * 2.0 - 1.0;
                let y = rng.r#gen::<f32>() * 0.5 - 0.5 + t;
                let radius = rng.r#gen::<f32>() * 4.0 * PI + 0.1;
                PointRecord::new(Vec2::new(x, y), 1.0, radius, color)
            })
            .collect::<Vec<_>>();

        log::info!(
            "generated {} points ({} bytes)",
            records.len(),
            records.len() as u64 * PointRecord::STRIDE
        );

        Self { records, gpu: None }
    }

    pub fn records(&self) -> &[PointRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Uploads the records on first call; later calls return the same buffer.
    pub fn upload(&mut self, device: &wgpu::Device) -> &wgpu::Buffer {
        let records = &self.records;
        self.gpu.get_or_insert_with(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("speck point buffer"),
                contents: bytemuck::cast_slice(records),
                usage: wgpu::BufferUsages::VERTEX,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const GRAY: Color = Color::rgb(0.7, 0.7, 0.7);

    fn field(count: usize, seed: u64) -> PointBuffer {
        PointBuffer::generate(count, GRAY, &mut StdRng::seed_from_u64(seed))
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn record_is_tightly_packed() {
        assert_eq!(PointRecord::STRIDE, 28);
        assert_eq!(PointRecord::POS_RADIUS_OFFSET, 0);
        assert_eq!(PointRecord::COLOR_OFFSET, 16);
    }

    #[test]
    fn accessors_read_back_fields() {
        let r = PointRecord::new(Vec2::new(0.25, -0.5), 1.0, 3.5, Color::rgb(0.1, 0.2, 0.3));
        assert_eq!(r.position(), Vec2::new(0.25, -0.5));
        assert_eq!(r.depth_flag(), 1.0);
        assert_eq!(r.radius(), 3.5);
        assert_eq!(r.color(), Color::rgb(0.1, 0.2, 0.3));

        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&r));
        assert_eq!(floats, &[0.25, -0.5, 1.0, 3.5, 0.1, 0.2, 0.3]);
    }

    // ── generation ────────────────────────────────────────────────────────

    #[test]
    fn generates_requested_count() {
        assert_eq!(field(1200, 1).len(), 1200);
        assert_eq!(std::mem::size_of_val(field(1200, 1).records()), 1200 * 28);
        assert!(field(0, 1).is_empty());
    }

    #[test]
    fn x_is_evenly_spaced() {
        let n = 1200;
        let points = field(n, 7);
        for (i, p) in points.records().iter().enumerate() {
            assert_eq!(p.position().x, (i as f32 / n as f32) * 2.0 - 1.0);
        }
        assert_eq!(points.records()[0].position().x, -1.0);
        assert_eq!(points.records()[600].position().x, 0.0);
    }

    #[test]
    fn y_jitters_around_ramp() {
        let n = 1200;
        let points = field(n, 11);
        for (i, p) in points.records().iter().enumerate() {
            let ramp = i as f32 / n as f32;
            let y = p.position().y;
            assert!(y >= ramp - 0.5 - 1e-6 && y < ramp + 1e-6, "y={y} ramp={ramp}");
        }
    }

    #[test]
    fn radius_in_range() {
        let upper = 0.1 + 4.0 * PI;
        for p in field(1200, 3).records() {
            assert!(p.radius() >= 0.1 && p.radius() <= upper, "radius {}", p.radius());
        }
    }

    #[test]
    fn color_and_depth_are_constant() {
        for p in field(1200, 5).records() {
            assert_eq!(p.color(), GRAY);
            assert_eq!(p.depth_flag(), 1.0);
        }
    }

    #[test]
    fn same_seed_same_field() {
        assert_eq!(field(64, 42).records(), field(64, 42).records());
        assert_ne!(field(64, 42).records(), field(64, 43).records());
    }
}
