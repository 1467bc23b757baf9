use anyhow::Result;

use speck_engine::core::{App, AppControl, FrameCtx};
use speck_engine::input::Key;
use speck_engine::logging::{init_logging, LoggingConfig};
use speck_engine::scene::{Scene, SceneConfig};
use speck_engine::window::{Runtime, RuntimeConfig};

/// Draws the point field every frame; Escape closes the window.
struct Demo {
    scene: Scene,
}

impl App for Demo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            ctx.runtime.close_window();
            return AppControl::Continue;
        }

        let frame = self
            .scene
            .frame_uniforms(ctx.input.pointer_pos, ctx.viewport(), ctx.time.tick);

        if ctx.time.tick == 0 {
            log::info!(
                "first frame: {}x{} @ {}x, {} points",
                frame.viewport.width,
                frame.viewport.height,
                frame.viewport.pixel_ratio,
                self.scene.points().len()
            );
        }

        let clear = self.scene.config().clear_color;
        let scene = &mut self.scene;
        ctx.render(clear, |rctx, target| scene.draw(rctx, target, &frame))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let scene = Scene::new(SceneConfig::default());
    let gpu_init = scene.config().gpu_init();

    Runtime::run(
        RuntimeConfig {
            title: "speck".to_string(),
            transparent: true,
            ..RuntimeConfig::default()
        },
        gpu_init,
        Demo { scene },
    )
}
