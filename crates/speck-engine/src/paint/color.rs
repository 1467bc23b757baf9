/// Linear straight-alpha RGBA color.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Clear value for a color attachment.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        assert_eq!(Color::rgb(0.7, 0.7, 0.7).a, 1.0);
    }

    #[test]
    fn to_wgpu_preserves_channels() {
        let c = Color::rgba(0.8, 0.3, 0.1, 0.5).to_wgpu();
        assert_eq!(c.r, 0.8f32 as f64);
        assert_eq!(c.g, 0.3f32 as f64);
        assert_eq!(c.b, 0.1f32 as f64);
        assert_eq!(c.a, 0.5);
    }
}
