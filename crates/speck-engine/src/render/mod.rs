//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipeline, uniform buffer, quad
//! buffers) and creates them lazily on first use, keyed on the surface format.
//!
//! Convention:
//! - positions are NDC on both CPU and GPU
//! - point sizes are device-independent; shaders scale them by the pixel ratio
//! - points are drawn as instanced quads whose corners span `[-1, 1]²` in
//!   sprite space

mod common;
mod ctx;
mod cursor;
mod particles;
mod point_buffer;
pub mod sprite;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use cursor::{CursorRenderer, CursorStyle};
pub use particles::{ParticleRenderer, ParticleStyle};
pub use point_buffer::{PointBuffer, PointRecord};
pub use uniforms::FrameUniforms;
