use bytemuck::{Pod, Zeroable};

use crate::coords::{Vec2, Viewport};

/// Per-frame values shared by every pass.
///
/// Resolved once per frame from explicit inputs and handed to each renderer,
/// so no pass reads pointer state on its own.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameUniforms {
    /// Pointer position in NDC.
    pub mouse_ndc: Vec2,
    pub viewport: Viewport,
    /// `tick * 0.001`. Uploaded but not read by any shader output.
    pub time: f32,
}

impl FrameUniforms {
    pub(super) fn to_gpu(self) -> FrameUniformRaw {
        FrameUniformRaw {
            mouse: self.mouse_ndc.to_array(),
            viewport: [self.viewport.width.max(1.0), self.viewport.height.max(1.0)],
            time: self.time,
            pixel_ratio: self.viewport.pixel_ratio,
            _pad: [0.0; 2],
        }
    }
}

/// GPU layout of `Frame` in the WGSL sources (32 bytes).
///
///  offset  0  mouse        vec2<f32>
///  offset  8  viewport     vec2<f32>
///  offset 16  time         f32
///  offset 20  pixel_ratio  f32
///  offset 24  pad          vec2<f32>
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct FrameUniformRaw {
    pub mouse: [f32; 2],
    pub viewport: [f32; 2],
    pub time: f32,
    pub pixel_ratio: f32,
    pub _pad: [f32; 2],
}
