//! The point-field scene: particle buffer, both passes and the per-frame
//! wiring between them.

mod config;
mod scene;

pub use config::SceneConfig;
pub use scene::Scene;
