use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::coords::{pointer_to_ndc, Vec2, Viewport};
use crate::render::sprite::{place_particle, SpritePlacement};
use crate::render::{
    CursorRenderer, FrameUniforms, ParticleRenderer, PointBuffer, RenderCtx, RenderTarget,
};

use super::config::SceneConfig;

/// Seconds of `time` uniform per frame tick.
const TICK_SECONDS: f32 = 0.001;

/// Owned scene context: the particle field and both passes.
///
/// Nothing here reads pointer state on its own. The caller resolves a
/// [`FrameUniforms`] from explicit inputs with [`Scene::frame_uniforms`] and
/// passes it into [`Scene::draw`].
pub struct Scene {
    config: SceneConfig,
    points: PointBuffer,
    particles: ParticleRenderer,
    cursor: CursorRenderer,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let points = PointBuffer::generate(config.particle_count, config.particle_color, &mut rng);

        Self {
            particles: ParticleRenderer::new(config.particle_style()),
            cursor: CursorRenderer::new(config.cursor_style()),
            points,
            config,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn points(&self) -> &PointBuffer {
        &self.points
    }

    /// Resolves the per-frame uniforms.
    ///
    /// `pointer` is in logical pixels; before the pointer has ever moved the
    /// caller passes `None` and the viewport center is used.
    pub fn frame_uniforms(&self, pointer: Option<Vec2>, viewport: Viewport, tick: u64) -> FrameUniforms {
        let pointer = pointer.unwrap_or_else(|| {
            let ratio = viewport.pixel_ratio.max(f32::EPSILON);
            Vec2::new(viewport.width / ratio, viewport.height / ratio) * 0.5
        });

        FrameUniforms {
            mouse_ndc: pointer_to_ndc(pointer, viewport),
            viewport,
            time: tick as f32 * TICK_SECONDS,
        }
    }

    /// CPU evaluation of where every particle is drawn for `frame`.
    ///
    /// Mirrors the particle vertex shader.
    pub fn placements<'a>(
        &'a self,
        frame: &'a FrameUniforms,
    ) -> impl Iterator<Item = SpritePlacement> + 'a {
        let snap = self.config.snap_radius;
        self.points.records().iter().map(move |p| {
            place_particle(frame.mouse_ndc, p.position(), p.depth_flag(), p.radius(), snap)
        })
    }

    /// Records one frame: cursor marker first, particles on top.
    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, frame: &FrameUniforms) {
        self.cursor.render(ctx, target, frame);
        self.particles.render(ctx, target, &mut self.points, frame);
    }
}
