//! Catch detection between the jerry can and a drop
//!
//! The can's sprite is mostly transparent padding, so a precise shape overlap
//! feels wrong in play. A drop counts as caught when its center is within a
//! radius of the can's center that scales with the can's width.

use crate::Rect;

/// Catch radius for a player of the given width
#[inline]
pub fn catch_radius(player_width: f32, min_radius: f32, width_factor: f32) -> f32 {
    min_radius.max(player_width * width_factor)
}

/// Distance between two rectangle centers
#[inline]
pub fn center_distance(a: &Rect, b: &Rect) -> f32 {
    a.center().distance(b.center())
}

/// Check whether a drop is inside the player's catch radius
pub fn is_caught(player: &Rect, drop: &Rect, min_radius: f32, width_factor: f32) -> bool {
    center_distance(player, drop) <= catch_radius(player.width, min_radius, width_factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: f32 = 18.0;
    const FACTOR: f32 = 0.45;

    #[test]
    fn test_catch_radius_scales_with_width() {
        assert!((catch_radius(216.0, MIN, FACTOR) - 97.2).abs() < 0.001);
    }

    #[test]
    fn test_catch_radius_floor() {
        // 0.45 * 20 = 9, below the floor
        assert_eq!(catch_radius(20.0, MIN, FACTOR), 18.0);
    }

    #[test]
    fn test_centered_drop_is_caught() {
        let player = Rect::new(100.0, 462.0, 216.0, 130.0);
        let drop = Rect::new(188.0, 507.0, 40.0, 40.0);
        assert_eq!(center_distance(&player, &drop), 0.0);
        assert!(is_caught(&player, &drop, MIN, FACTOR));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // Small player: radius is the 18px floor
        let player = Rect::new(0.0, 0.0, 20.0, 20.0);
        // Drop center exactly 18px to the right of the player center
        let drop = Rect::new(18.0, 0.0, 20.0, 20.0);
        assert_eq!(center_distance(&player, &drop), 18.0);
        assert!(is_caught(&player, &drop, MIN, FACTOR));

        let drop = Rect::new(18.5, 0.0, 20.0, 20.0);
        assert!(!is_caught(&player, &drop, MIN, FACTOR));
    }

    #[test]
    fn test_far_drop_is_not_caught() {
        let player = Rect::new(300.0, 462.0, 216.0, 130.0);
        let drop = Rect::new(10.0, 0.0, 40.0, 40.0);
        assert!(!is_caught(&player, &drop, MIN, FACTOR));
    }
}
