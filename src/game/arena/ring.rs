use bevy::math::Vec2;

pub const RING_MIN_X: f32 = 7.0;
pub const RING_MAX_X: f32 = 60.0;
pub const RING_MIN_Y: f32 = 4.0;
pub const RING_MAX_Y: f32 = 22.0;
/// The ring floor is a trapezoid: both side ropes lean inward by 1 / SLOPE per unit of height.
pub const RING_SLOPE: f32 = 3.16;

/// Leftmost allowed x at height `y`.
pub fn x_min(y: f32) -> f32 {
    y / RING_SLOPE + RING_MIN_X
}

/// Rightmost allowed x at height `y`.
pub fn x_max(y: f32) -> f32 {
    -y / RING_SLOPE + RING_MAX_X
}

/// Keep a fighter position on the ring floor.
///
/// y is clamped first so that the x bounds are always computed from a
/// height that lies inside the ring.
pub fn clamp(position: Vec2) -> Vec2 {
    let y = position.y.clamp(RING_MIN_Y, RING_MAX_Y);
    let x = position.x.clamp(x_min(y), x_max(y));
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inside_position_is_untouched() {
        let p = Vec2::new(30.0, 15.0);
        assert_eq!(clamp(p), p);
    }

    #[test]
    fn x_bounds_use_the_clamped_height() {
        // Far above the ring: y snaps to RING_MAX_Y and x to the top-right corner.
        let p = clamp(Vec2::new(100.0, 100.0));
        assert_eq!(p.y, RING_MAX_Y);
        assert_eq!(p.x, x_max(RING_MAX_Y));
    }

    #[test]
    fn left_rope_leans_inward_with_height() {
        let low = clamp(Vec2::new(0.0, RING_MIN_Y));
        let high = clamp(Vec2::new(0.0, RING_MAX_Y));
        assert!(high.x > low.x);
        assert_eq!(low.x, RING_MIN_Y / RING_SLOPE + RING_MIN_X);
    }

    proptest! {
        #[test]
        fn clamped_position_is_inside_the_ring(
            x in -200.0f32..200.0f32,
            y in -200.0f32..200.0f32
        ) {
            let p = clamp(Vec2::new(x, y));
            prop_assert!(p.y >= RING_MIN_Y && p.y <= RING_MAX_Y);
            prop_assert!(p.x >= x_min(p.y) && p.x <= x_max(p.y));
        }

        #[test]
        fn clamp_is_idempotent(
            x in -200.0f32..200.0f32,
            y in -200.0f32..200.0f32
        ) {
            let once = clamp(Vec2::new(x, y));
            prop_assert_eq!(clamp(once), once);
        }
    }
}
