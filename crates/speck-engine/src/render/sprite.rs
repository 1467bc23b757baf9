//! CPU side of the point-sprite shader math.
//!
//! `shaders/particles.wgsl` and `shaders/cursor.wgsl` compute exactly these
//! functions per vertex / per fragment. Keeping them here lets the behaviour be
//! checked without a GPU.

use crate::coords::{Vec2, Viewport};

/// Distance (NDC) under which a particle snaps onto the pointer.
pub const SNAP_RADIUS: f32 = 0.05;

/// Where and how large a point sprite is drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpritePlacement {
    /// Sprite center in NDC.
    pub center: Vec2,
    /// Clip-space z of the sprite.
    pub depth: f32,
    /// Sprite diameter in device-independent units.
    pub size: f32,
}

/// Places a particle, pulling it onto the pointer when within `snap_radius`.
///
/// Inside the radius the particle is drawn at the pointer with size
/// `radius * (2 - l)`; outside it is drawn where it is, at `radius`.
pub fn place_particle(
    mouse: Vec2,
    position: Vec2,
    depth: f32,
    radius: f32,
    snap_radius: f32,
) -> SpritePlacement {
    let l = mouse.distance(position);

    if l < snap_radius {
        SpritePlacement {
            center: mouse,
            depth: 0.0,
            size: radius * (2.0 - l),
        }
    } else {
        SpritePlacement {
            center: position,
            depth,
            size: radius,
        }
    }
}

/// Half the sprite's extent in NDC along each axis.
///
/// The on-screen diameter is `size * pixel_ratio` physical pixels.
pub fn half_extent_ndc(size: f32, viewport: Viewport) -> Vec2 {
    let px = size * viewport.pixel_ratio;
    Vec2::new(px / viewport.width.max(1.0), px / viewport.height.max(1.0))
}

/// Squared distance from the sprite center, `0` at the center and `1` on the
/// inscribed circle.
#[inline]
pub fn sprite_radial(corner: Vec2) -> f32 {
    corner.dot(corner)
}

/// WGSL `smoothstep`. A degenerate edge (`e1 <= e0`) behaves as a step at `e0`.
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    if e1 <= e0 {
        return if x < e0 { 0.0 } else { 1.0 };
    }
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Soft disc edge: `max_alpha` inside `1 - delta`, `0` beyond `1 + delta`,
/// smooth in between.
///
/// `delta` is the screen-space derivative of `r` (`fwidth(r)` on the GPU).
/// The result is clamped to `[0, 1]` like any write to a unorm target.
pub fn edge_alpha(r: f32, delta: f32, max_alpha: f32) -> f32 {
    (max_alpha - smoothstep(1.0 - delta, 1.0 + delta, r)).clamp(0.0, 1.0)
}

/// Alpha of a disc fragment, or `None` when the fragment is discarded.
///
/// Soft-edged fragments with no coverage are discarded rather than written
/// at alpha 0. `delta = None` is the no-derivative path: a hard-edged opaque
/// disc.
pub fn disc_alpha(r: f32, delta: Option<f32>, max_alpha: f32) -> Option<f32> {
    match delta {
        Some(delta) => Some(edge_alpha(r, delta, max_alpha)).filter(|&a| a > 0.0),
        None if r > 1.0 => None,
        None => Some(1.0),
    }
}

/// One channel pair of a fixed-function blend, as the GPU evaluates it into
/// a unorm target: `(rgb, alpha)` of `src` combined with `dst`.
///
/// Only the factors the sprite pipelines use are modelled.
pub fn blend_unorm(state: wgpu::BlendState, src: [f32; 4], dst: [f32; 4]) -> [f32; 4] {
    let src_alpha = src[3];
    let factor = |f: wgpu::BlendFactor| match f {
        wgpu::BlendFactor::Zero => 0.0,
        wgpu::BlendFactor::SrcAlpha => src_alpha,
        wgpu::BlendFactor::OneMinusSrcAlpha => 1.0 - src_alpha,
        _ => 1.0,
    };
    let apply = |c: wgpu::BlendComponent, s: f32, d: f32| {
        let (fs, fd) = (s * factor(c.src_factor), d * factor(c.dst_factor));
        let out = match c.operation {
            wgpu::BlendOperation::Add => fs + fd,
            wgpu::BlendOperation::Subtract => fs - fd,
            wgpu::BlendOperation::ReverseSubtract => fd - fs,
            wgpu::BlendOperation::Min => s.min(d),
            wgpu::BlendOperation::Max => s.max(d),
        };
        out.clamp(0.0, 1.0)
    };
    [
        apply(state.color, src[0], dst[0]),
        apply(state.color, src[1], dst[1]),
        apply(state.color, src[2], dst[2]),
        apply(state.alpha, src[3], dst[3]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── place_particle ────────────────────────────────────────────────────

    #[test]
    fn coincident_point_snaps_and_doubles() {
        let p = Vec2::new(0.3, -0.2);
        let placed = place_particle(p, p, 1.0, 5.0, SNAP_RADIUS);
        assert_eq!(placed.center, p);
        assert_eq!(placed.size, 10.0);
    }

    #[test]
    fn near_point_snaps_to_mouse() {
        let mouse = Vec2::new(0.0, 0.0);
        let placed = place_particle(mouse, Vec2::new(0.03, 0.0), 1.0, 4.0, SNAP_RADIUS);
        assert_eq!(placed.center, mouse);
        assert_eq!(placed.depth, 0.0);
        assert!((placed.size - 4.0 * (2.0 - 0.03)).abs() < 1e-6);
    }

    #[test]
    fn far_point_is_unmodified() {
        let pos = Vec2::new(0.5, 0.5);
        let placed = place_particle(Vec2::new(0.0, 0.0), pos, 1.0, 7.5, SNAP_RADIUS);
        assert_eq!(placed, SpritePlacement { center: pos, depth: 1.0, size: 7.5 });
    }

    #[test]
    fn threshold_is_exclusive() {
        let pos = Vec2::new(0.5, 0.0);
        let mouse = Vec2::new(0.5 - 0.0625, 0.0);
        // 0.0625 is exact in f32, so the distance equals the radius.
        let placed = place_particle(mouse, pos, 1.0, 3.0, 0.0625);
        assert_eq!(placed.center, pos);
        assert_eq!(placed.size, 3.0);
    }

    // ── half_extent_ndc ───────────────────────────────────────────────────

    #[test]
    fn cursor_extent_on_800x600() {
        let half = half_extent_ndc(42.0, Viewport::new(800.0, 600.0, 1.0));
        assert!((half.x - 42.0 / 800.0).abs() < 1e-7);
        assert!((half.y - 42.0 / 600.0).abs() < 1e-7);
    }

    #[test]
    fn extent_scales_with_pixel_ratio() {
        let one = half_extent_ndc(10.0, Viewport::new(800.0, 600.0, 1.0));
        let two = half_extent_ndc(10.0, Viewport::new(800.0, 600.0, 2.0));
        assert_eq!(two, one * 2.0);
    }

    // ── edge alpha ────────────────────────────────────────────────────────

    #[test]
    fn sprite_radial_is_one_on_edge_midpoints() {
        assert_eq!(sprite_radial(Vec2::new(1.0, 0.0)), 1.0);
        assert_eq!(sprite_radial(Vec2::new(0.0, 0.0)), 0.0);
        assert_eq!(sprite_radial(Vec2::new(1.0, 1.0)), 2.0);
    }

    #[test]
    fn edge_alpha_is_monotone_across_band() {
        let delta = 0.1;
        for max_alpha in [1.0, 0.3] {
            let mut prev = f32::INFINITY;
            for i in 0..=100 {
                let r = 0.8 + i as f32 * 0.004;
                let a = edge_alpha(r, delta, max_alpha);
                assert!(a <= prev + 1e-6, "alpha rose at r={r}: {a} > {prev}");
                prev = a;
            }
        }
    }

    #[test]
    fn edge_alpha_hits_bounds() {
        let delta = 0.05;
        assert_eq!(edge_alpha(1.0 - delta, delta, 1.0), 1.0);
        assert_eq!(edge_alpha(0.0, delta, 1.0), 1.0);
        assert_eq!(edge_alpha(1.0 + delta, delta, 1.0), 0.0);
        assert_eq!(edge_alpha(1.5, delta, 1.0), 0.0);

        assert_eq!(edge_alpha(0.2, delta, 0.3), 0.3);
        assert_eq!(edge_alpha(1.0 + delta, delta, 0.3), 0.0);
    }

    #[test]
    fn edge_alpha_is_half_on_the_rim() {
        assert!((edge_alpha(1.0, 0.1, 1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn no_derivatives_gives_hard_disc() {
        assert_eq!(disc_alpha(0.5, None, 0.3), Some(1.0));
        assert_eq!(disc_alpha(1.0, None, 1.0), Some(1.0));
        assert_eq!(disc_alpha(1.01, None, 1.0), None);
    }

    #[test]
    fn zero_coverage_fragments_are_discarded() {
        let delta = 0.05;
        assert_eq!(disc_alpha(sprite_radial(Vec2::new(1.0, 1.0)), Some(delta), 0.3), None);
        assert_eq!(disc_alpha(1.0 + delta, Some(delta), 1.0), None);
        // With max_alpha 0.3 coverage runs out inside the band.
        assert_eq!(disc_alpha(1.0, Some(delta), 0.3), None);
        assert_eq!(disc_alpha(0.0, Some(delta), 0.3), Some(0.3));
    }

    #[test]
    fn blend_unorm_clamps_subtract_to_zero() {
        let sub = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Subtract,
            },
            alpha: wgpu::BlendComponent::REPLACE,
        };
        let out = blend_unorm(sub, [0.5, 1.0, 0.0, 0.5], [1.0, 0.2, 1.0, 0.7]);
        assert_eq!(out[0], 0.0);
        assert!((out[1] - 0.4).abs() < 1e-6);
        assert_eq!(out[2], 0.0);
        assert_eq!(out[3], 0.5);
    }

    #[test]
    fn smoothstep_matches_wgsl_endpoints() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(1.0, 1.0, 0.5), 0.0);
    }
}
