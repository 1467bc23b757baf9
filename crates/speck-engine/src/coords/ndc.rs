use super::{Vec2, Viewport};

/// Converts a pointer position (logical px, top-left origin, +Y down) to NDC.
///
/// ```text
/// ndc.x = (x * ratio / width) * 2 - 1
/// ndc.y = ((height - y * ratio) / height) * 2 - 1
/// ```
///
/// The Y flip puts the window's top edge at `+1`.
pub fn pointer_to_ndc(pointer: Vec2, viewport: Viewport) -> Vec2 {
    let w = viewport.width.max(1.0);
    let h = viewport.height.max(1.0);
    let ratio = viewport.pixel_ratio;

    Vec2::new(
        (pointer.x * ratio / w) * 2.0 - 1.0,
        ((h - pointer.y * ratio) / h) * 2.0 - 1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp(w: f32, h: f32, ratio: f32) -> Viewport {
        Viewport::new(w, h, ratio)
    }

    #[test]
    fn center_maps_to_origin() {
        let ndc = pointer_to_ndc(Vec2::new(400.0, 300.0), vp(800.0, 600.0, 1.0));
        assert_eq!(ndc, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn top_left_maps_to_minus_x_plus_y() {
        let ndc = pointer_to_ndc(Vec2::new(0.0, 0.0), vp(800.0, 600.0, 1.0));
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn bottom_right_maps_to_plus_x_minus_y() {
        let ndc = pointer_to_ndc(Vec2::new(800.0, 600.0), vp(800.0, 600.0, 1.0));
        assert_eq!(ndc, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn pixel_ratio_scales_logical_pointer() {
        // 400x300 logical on a 2x display is the center of an 800x600 surface.
        let ndc = pointer_to_ndc(Vec2::new(200.0, 150.0), vp(800.0, 600.0, 2.0));
        assert_eq!(ndc, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn zero_viewport_does_not_produce_nan() {
        let ndc = pointer_to_ndc(Vec2::new(10.0, 10.0), vp(0.0, 0.0, 1.0));
        assert!(ndc.x.is_finite() && ndc.y.is_finite());
    }
}
