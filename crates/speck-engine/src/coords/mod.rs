//! Coordinate and geometry types shared across the runtime and renderers.
//!
//! Two spaces are in play:
//! - pointer space: logical pixels, origin top-left, +Y down
//! - NDC: `[-1, 1]²`, origin at the center, +Y up
//!
//! Point positions live in NDC from the start; only the pointer needs converting.

mod ndc;
mod vec2;
mod viewport;

pub use ndc::pointer_to_ndc;
pub use vec2::Vec2;
pub use viewport::Viewport;
