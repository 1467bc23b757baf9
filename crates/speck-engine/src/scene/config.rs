use crate::device::GpuInit;
use crate::paint::Color;
use crate::render::{CursorStyle, ParticleStyle};
use crate::render::sprite::SNAP_RADIUS;

/// Scene parameters. Defaults reproduce the stock demo.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub particle_color: Color,
    /// NDC distance under which particles snap onto the pointer.
    pub snap_radius: f32,

    /// Pointer marker diameter in device-independent units.
    pub cursor_size: f32,
    pub cursor_color: Color,
    pub cursor_max_alpha: f32,

    /// Straight-alpha clear. The default is white at zero alpha, so only what
    /// the passes draw carries coverage to the compositor.
    pub clear_color: Color,

    /// Soft disc edges from screen-space derivatives. Baked into the
    /// pipelines; `false` renders hard-edged discs.
    pub antialias: bool,

    /// Seed for particle generation. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 1200,
            particle_color: Color::rgb(0.7, 0.7, 0.7),
            snap_radius: SNAP_RADIUS,
            cursor_size: 42.0,
            cursor_color: Color::rgb(0.8, 0.3, 0.1),
            cursor_max_alpha: 0.3,
            clear_color: Color::rgba(1.0, 1.0, 1.0, 0.0),
            antialias: true,
            seed: None,
        }
    }
}

impl SceneConfig {
    /// Surface setup the scene's colors are authored for.
    ///
    /// Colors are written as-is into a non-sRGB target and blended there, and
    /// the surface is composited premultiplied where the platform allows it.
    pub fn gpu_init(&self) -> GpuInit {
        GpuInit {
            prefer_srgb: false,
            alpha_mode: Some(wgpu::CompositeAlphaMode::PreMultiplied),
            ..GpuInit::default()
        }
    }

    pub fn particle_style(&self) -> ParticleStyle {
        ParticleStyle {
            snap_radius: self.snap_radius,
            antialias: self.antialias,
        }
    }

    pub fn cursor_style(&self) -> CursorStyle {
        CursorStyle {
            size: self.cursor_size,
            color: self.cursor_color,
            max_alpha: self.cursor_max_alpha,
            antialias: self.antialias,
        }
    }
}
