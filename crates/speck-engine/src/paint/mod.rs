//! Paint model shared between the scene and renderers.
//!
//! Colors are straight (non-premultiplied) alpha: every pass blends with
//! `SrcAlpha / OneMinusSrcAlpha`, so the shaders emit straight RGBA.

pub mod color;

pub use color::Color;
